//! Output module for extracted works and harvest summaries
//!
//! This module handles:
//! - Handing extracted works to a sink (discard or text files)
//! - Recording per-work outcomes of a harvest
//! - Generating a markdown harvest summary

mod markdown;
mod text;
mod traits;

pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use text::{slugify, DiscardSink, TextDirectorySink};
pub use traits::{
    HarvestReport, HarvestedWork, OutputError, OutputResult, WorkOutcome, WorkSink, WorkStatus,
};
