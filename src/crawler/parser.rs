//! Parsed page representation
//!
//! A [`Page`] is one fetched HTML document together with the URL it was
//! fetched from. Link attributes are made absolute against that URL at the
//! point they are read, so every href a caller sees is already absolute.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// One fetched and parsed HTML document
#[derive(Debug)]
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    /// Parses HTML content fetched from `url`
    ///
    /// # Example
    ///
    /// ```
    /// use url::Url;
    /// use wikiscribe::crawler::Page;
    ///
    /// let url = Url::parse("https://en.wikisource.org/wiki/Dagon").unwrap();
    /// let page = Page::parse(url, r#"<html><body><a href="/wiki/Other">x</a></body></html>"#);
    /// assert_eq!(page.resolve_href("/wiki/Other"), "https://en.wikisource.org/wiki/Other");
    /// ```
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// The URL the page was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The parsed document tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolves an href against the page URL
    ///
    /// Relative paths, fragment-only references and empty hrefs all resolve.
    /// An href that cannot be joined is returned trimmed but otherwise as-is.
    pub fn resolve_href(&self, href: &str) -> String {
        let href = href.trim();
        match self.url.join(href) {
            Ok(absolute) => absolute.to_string(),
            Err(_) => href.to_string(),
        }
    }

    /// Returns the absolute `href` of an element, if it has one
    pub fn href_of(&self, element: ElementRef<'_>) -> Option<String> {
        element
            .value()
            .attr("href")
            .map(|href| self.resolve_href(href))
    }

    /// Returns the absolute hrefs of every element matching `selector`
    ///
    /// Matches lacking an `href` attribute are skipped. Order is document order.
    pub fn links(&self, selector: &Selector) -> Vec<String> {
        self.html
            .select(selector)
            .filter_map(|element| self.href_of(element))
            .collect()
    }
}
