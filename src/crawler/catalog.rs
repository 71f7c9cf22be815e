//! Catalog resolver
//!
//! Turns an author catalog page into the ordered list of the author's work
//! page URLs.

use crate::config::SourceConfig;
use crate::crawler::fetcher::load_page;
use crate::crawler::layout::PageLayout;
use crate::url::{classify_link, dedup_preserving_order};
use crate::Result;
use reqwest::Client;
use std::collections::HashSet;

/// Resolves an author catalog page into work page URLs
///
/// Takes the first link of each bullet in the catalog's main link list, keeps
/// the ones that are works according to `rules`, removes duplicates (first
/// occurrence wins) and finally drops anything listed in `exclude`.
///
/// An empty result is not an error: an author page whose structure does not
/// match the layout simply has no works.
///
/// # Errors
///
/// Fails if the catalog page cannot be fetched.
pub async fn resolve_author_works(
    client: &Client,
    layout: &dyn PageLayout,
    rules: &SourceConfig,
    catalog_url: &str,
    exclude: &[String],
) -> Result<Vec<String>> {
    let candidates = {
        let page = load_page(client, catalog_url).await?;
        layout.catalog_links(&page)
    };
    tracing::debug!(
        candidates = candidates.len(),
        "Read catalog list of {}",
        catalog_url
    );

    let works = filter_work_links(candidates, rules, exclude);
    tracing::info!("Resolved {} works from {}", works.len(), catalog_url);

    Ok(works)
}

/// Applies the namespace, label, dedup, and exclusion filters in that order
pub fn filter_work_links(
    candidates: Vec<String>,
    rules: &SourceConfig,
    exclude: &[String],
) -> Vec<String> {
    let works = candidates.into_iter().filter(|link| {
        let classification = classify_link(link, rules);
        if !classification.is_work() {
            tracing::trace!(?classification, "Dropping catalog link {}", link);
        }
        classification.is_work()
    });

    let excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();
    dedup_preserving_order(works)
        .into_iter()
        .filter(|link| !excluded.contains(link.as_str()))
        .collect()
}
