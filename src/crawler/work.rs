//! Work extractor
//!
//! Fetches a work page, follows its chapter or section sub-pages, and
//! concatenates the prose of every sub-page that links back to the work.

use crate::config::{FailureMode, SourceConfig};
use crate::crawler::fetcher::load_page;
use crate::crawler::layout::PageLayout;
use crate::crawler::parser::Page;
use crate::url::{dedup_preserving_order, links_containing};
use crate::Result;
use reqwest::Client;
use url::Url;

/// Extracts the full text of one work
///
/// Sub-pages are links inside the work page's content list items that embed
/// the work URL. The `full-view-suffix` view is skipped since it repeats
/// every chapter. A work with no sub-pages is read from its own page.
///
/// Each sub-page contributes its paragraphs joined by `\n`; pages are
/// concatenated without a separator. A sub-page without any link back to the
/// work URL is assumed to belong to something else and contributes nothing.
///
/// # Errors
///
/// The work page itself must load. A failing sub-page aborts the extraction
/// under [`FailureMode::Strict`] and is skipped under [`FailureMode::Skip`].
pub async fn extract_work(
    client: &Client,
    layout: &dyn PageLayout,
    rules: &SourceConfig,
    mode: FailureMode,
    work_url: &str,
) -> Result<String> {
    // Match against the serialized form so it lines up with resolved hrefs
    let work_url = Url::parse(work_url)?.to_string();

    let pages = {
        let page = load_page(client, &work_url).await?;
        subpage_links(&layout.work_links(&page), &work_url, &rules.full_view_suffix)
    };
    tracing::debug!(pages = pages.len(), "Extracting {}", work_url);

    let mut text = String::new();
    for page_url in &pages {
        let page = match load_page(client, page_url).await {
            Ok(page) => page,
            Err(e) if mode == FailureMode::Skip => {
                tracing::warn!("Skipping {}: {}", page_url, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        match page_text(layout, &page, &work_url) {
            Some(fragment) => text.push_str(&fragment),
            None => tracing::warn!("{} has no link back to {}, skipped", page_url, work_url),
        }
    }

    Ok(text)
}

/// Picks the sub-pages of a work from the links on its page
///
/// Falls back to the work page itself when no link qualifies.
pub fn subpage_links(links: &[String], work_url: &str, full_view_suffix: &str) -> Vec<String> {
    let related = links_containing(links, work_url)
        .into_iter()
        .filter(|link| !link.ends_with(full_view_suffix));
    let pages = dedup_preserving_order(related);

    if pages.is_empty() {
        vec![work_url.to_string()]
    } else {
        pages
    }
}

/// Returns the page's prose, or `None` when the page never links to `work_url`
pub fn page_text(layout: &dyn PageLayout, page: &Page, work_url: &str) -> Option<String> {
    let links_back = layout
        .all_links(page)
        .iter()
        .any(|link| link.contains(work_url));

    if !links_back {
        return None;
    }

    Some(layout.paragraphs(page).join("\n"))
}
