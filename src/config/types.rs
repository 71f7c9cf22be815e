use serde::Deserialize;
use std::fmt;

/// Main configuration structure for Wikiscribe
///
/// Every section is optional. A missing section falls back to the built-in
/// English Wikisource defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub layout: LayoutConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: Option<UserAgentConfig>,
    pub output: OutputConfig,
    #[serde(rename = "author")]
    pub authors: Vec<AuthorEntry>,
}

/// Rules describing which URLs on the source site are works
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL prefix under which every content page lives (no trailing slash)
    #[serde(rename = "work-namespace-prefix")]
    pub work_namespace_prefix: String,

    /// Final-segment labels marking administrative pages
    #[serde(rename = "excluded-labels")]
    pub excluded_labels: Vec<String>,

    /// Suffix of the "whole work on one page" view
    #[serde(rename = "full-view-suffix")]
    pub full_view_suffix: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            work_namespace_prefix: "https://en.wikisource.org/wiki".to_string(),
            excluded_labels: ["Wikisource:", "Author:", "Special:", "File:", "Help:"]
                .iter()
                .map(|label| label.to_string())
                .collect(),
            full_view_suffix: "/full".to_string(),
        }
    }
}

/// CSS selectors locating content on catalog and work pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// First link of each bullet in the catalog page's main link list
    #[serde(rename = "catalog-links")]
    pub catalog_links: String,

    /// Links nested in list items of a work page's content
    #[serde(rename = "work-links")]
    pub work_links: String,

    /// Main content container; only the first match is used
    #[serde(rename = "content-root")]
    pub content_root: String,

    /// Inner wrapper holding the rendered text
    #[serde(rename = "content-wrapper")]
    pub content_wrapper: String,

    /// Number of nested `div`s between the wrapper and a text paragraph
    #[serde(rename = "paragraph-depths")]
    pub paragraph_depths: Vec<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            catalog_links: "html > body > div:nth-of-type(3) > div:nth-of-type(3) \
                            > div:nth-of-type(4) > div > ul > li > a:first-of-type"
                .to_string(),
            work_links: r#"[class="mw-parser-output"] li > a"#.to_string(),
            content_root: "div#mw-content-text".to_string(),
            content_wrapper: r#"div[class="mw-parser-output"]"#.to_string(),
            paragraph_depths: vec![1, 2, 0],
        }
    }
}

/// How page fetch failures are handled during a harvest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Any failed fetch aborts the whole operation
    #[default]
    Strict,
    /// Failed sub-pages and works are logged and skipped
    Skip,
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds; unset means wait indefinitely
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    #[serde(rename = "failure-mode")]
    pub failure_mode: FailureMode,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one text file per work
    pub directory: Option<String>,

    /// Path to the markdown harvest summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

/// Author catalog to harvest
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorEntry {
    /// The author's catalog page
    #[serde(rename = "catalog-url")]
    pub catalog_url: String,

    /// Work URLs listed on the catalog page that should not be harvested
    #[serde(default)]
    pub exclude: Vec<String>,
}
