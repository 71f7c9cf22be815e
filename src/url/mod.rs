//! URL handling module for Wikiscribe
//!
//! This module provides the string-level URL rules the crawler applies to
//! candidate links: namespace prefix checks, reserved-label checks,
//! order-preserving deduplication, and substring filters.

mod matcher;
mod namespace;

use crate::config::SourceConfig;

// Re-export main functions
pub use matcher::{contains_any_label, dedup_preserving_order, links_containing};
pub use namespace::{directory_prefix, final_segment};

/// Link classification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClassification {
    /// A content page in the work namespace
    Work,
    /// Lives outside the work namespace (other host, deeper path, scripts)
    OutsideNamespace,
    /// In the namespace but its final segment carries a reserved label
    Reserved,
}

impl LinkClassification {
    /// Returns true if the link may be a work
    pub fn is_work(&self) -> bool {
        matches!(self, Self::Work)
    }
}

/// Classifies a catalog link according to the source rules
///
/// The directory of the link (everything before its last `/`) must equal
/// the work-namespace prefix exactly; then the final segment must not
/// contain any excluded label.
///
/// # Examples
///
/// ```
/// use wikiscribe::config::SourceConfig;
/// use wikiscribe::url::{classify_link, LinkClassification};
///
/// let rules = SourceConfig::default();
/// assert_eq!(
///     classify_link("https://en.wikisource.org/wiki/The_Raven", &rules),
///     LinkClassification::Work
/// );
/// assert_eq!(
///     classify_link("https://en.wikisource.org/wiki/Special:Random", &rules),
///     LinkClassification::Reserved
/// );
/// ```
pub fn classify_link(link: &str, rules: &SourceConfig) -> LinkClassification {
    if directory_prefix(link) != rules.work_namespace_prefix {
        return LinkClassification::OutsideNamespace;
    }

    if contains_any_label(final_segment(link), &rules.excluded_labels) {
        return LinkClassification::Reserved;
    }

    LinkClassification::Work
}
