//! Crawler module for page loading and text extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and page parsing
//! - Layout locators for catalog links, sub-page links and paragraphs
//! - Catalog resolution and work extraction
//! - Overall harvest coordination

mod catalog;
mod coordinator;
mod fetcher;
mod layout;
mod parser;
mod work;

pub use catalog::{filter_work_links, resolve_author_works};
pub use coordinator::Harvester;
pub use fetcher::{build_http_client, fetch_body, format_user_agent, load_page};
pub use layout::{compile_selector, PageLayout, SelectorLayout};
pub use parser::Page;
pub use work::{extract_work, page_text, subpage_links};
