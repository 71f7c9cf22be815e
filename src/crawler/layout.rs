//! Page layout locators
//!
//! Catalog and work pages are read through fixed structural positions. This
//! module keeps those positions behind the [`PageLayout`] trait so a layout
//! change on the source site is patched here (or in `[layout]` config)
//! without touching the crawl control flow.

use crate::config::LayoutConfig;
use crate::crawler::parser::Page;
use crate::{ConfigError, ConfigResult};
use ego_tree::NodeId;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;

/// Finds the parts of a page the crawler cares about
pub trait PageLayout {
    /// Candidate work links on an author catalog page, in document order
    fn catalog_links(&self, page: &Page) -> Vec<String>;

    /// Candidate sub-page links on a work page, in document order
    fn work_links(&self, page: &Page) -> Vec<String>;

    /// Every hyperlink on the page
    fn all_links(&self, page: &Page) -> Vec<String>;

    /// Text fragments of the page's prose paragraphs, in document order
    fn paragraphs(&self, page: &Page) -> Vec<String>;
}

/// Compiles a CSS selector, reporting failures as configuration errors
pub fn compile_selector(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// [`PageLayout`] driven by CSS selectors from configuration
#[derive(Debug, Clone)]
pub struct SelectorLayout {
    catalog_links: Selector,
    work_links: Selector,
    anchors: Selector,
    content_root: Selector,
    content_wrapper: Selector,
    paragraph_depths: Vec<usize>,
}

impl SelectorLayout {
    /// Compiles every selector in the layout configuration
    pub fn from_config(config: &LayoutConfig) -> ConfigResult<Self> {
        Ok(Self {
            catalog_links: compile_selector(&config.catalog_links)?,
            work_links: compile_selector(&config.work_links)?,
            anchors: compile_selector("a")?,
            content_root: compile_selector(&config.content_root)?,
            content_wrapper: compile_selector(&config.content_wrapper)?,
            paragraph_depths: config.paragraph_depths.clone(),
        })
    }
}

impl PageLayout for SelectorLayout {
    fn catalog_links(&self, page: &Page) -> Vec<String> {
        page.links(&self.catalog_links)
    }

    fn work_links(&self, page: &Page) -> Vec<String> {
        page.links(&self.work_links)
    }

    fn all_links(&self, page: &Page) -> Vec<String> {
        page.links(&self.anchors)
    }

    fn paragraphs(&self, page: &Page) -> Vec<String> {
        let Some(root) = page.html().select(&self.content_root).next() else {
            tracing::debug!("No content root on {}", page.url());
            return Vec::new();
        };

        let mut matched = HashSet::new();
        for wrapper in root.select(&self.content_wrapper) {
            for depth in &self.paragraph_depths {
                collect_paragraphs(wrapper, *depth, &mut matched);
            }
        }

        // A paragraph reachable through several shapes still counts once
        root.descendants()
            .filter(|node| matched.contains(&node.id()))
            .filter_map(ElementRef::wrap)
            .flat_map(|paragraph| paragraph.text())
            .map(str::to_string)
            .collect()
    }
}

/// Records `p` children reached after descending exactly `depth` nested `div`s
fn collect_paragraphs(element: ElementRef<'_>, depth: usize, matched: &mut HashSet<NodeId>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "p" if depth == 0 => {
                matched.insert(child.id());
            }
            "div" if depth > 0 => collect_paragraphs(child, depth - 1, matched),
            _ => {}
        }
    }
}
