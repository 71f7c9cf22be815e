//! Harvest coordinator - drives catalog resolution and work extraction
//!
//! The [`Harvester`] owns the HTTP client, the compiled page layout and the
//! configuration, and runs the two crawl stages one after the other:
//! - Resolve an author catalog into work URLs
//! - Extract each work in catalog order and hand it to a sink
//!
//! Everything runs sequentially; one request is in flight at a time.

use crate::config::{Config, FailureMode};
use crate::crawler::catalog;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::layout::SelectorLayout;
use crate::crawler::work;
use crate::output::{HarvestReport, HarvestedWork, WorkOutcome, WorkSink, WorkStatus};
use crate::Result;
use reqwest::Client;

/// Main harvest coordinator structure
pub struct Harvester {
    config: Config,
    client: Client,
    layout: SelectorLayout,
}

impl Harvester {
    /// Creates a new harvester from a validated configuration
    ///
    /// # Errors
    ///
    /// * `WikiscribeError::Config` - A layout selector does not compile
    /// * `WikiscribeError::Client` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let layout = SelectorLayout::from_config(&config.layout)?;
        let client = build_http_client(&config.fetch, config.user_agent.as_ref())?;

        Ok(Self {
            config,
            client,
            layout,
        })
    }

    /// The configuration the harvester was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves an author catalog page into work URLs
    pub async fn resolve_author_works(
        &self,
        catalog_url: &str,
        exclude: &[String],
    ) -> Result<Vec<String>> {
        catalog::resolve_author_works(
            &self.client,
            &self.layout,
            &self.config.source,
            catalog_url,
            exclude,
        )
        .await
    }

    /// Extracts the text of one work
    pub async fn extract_work(&self, work_url: &str) -> Result<String> {
        work::extract_work(
            &self.client,
            &self.layout,
            &self.config.source,
            self.config.fetch.failure_mode,
            work_url,
        )
        .await
    }

    /// Resolves an author catalog and extracts every work into `sink`
    ///
    /// Under [`FailureMode::Strict`] the first failed work aborts the harvest.
    /// Under [`FailureMode::Skip`] the failure is recorded in the report and
    /// the harvest continues with the next work. A catalog page that cannot
    /// be fetched, or a sink that cannot store a work, always aborts.
    pub async fn harvest_author(
        &self,
        catalog_url: &str,
        exclude: &[String],
        sink: &mut dyn WorkSink,
    ) -> Result<HarvestReport> {
        tracing::info!("Harvesting {}", catalog_url);
        let links = self.resolve_author_works(catalog_url, exclude).await?;

        let mut report = HarvestReport {
            catalog_url: catalog_url.to_string(),
            works: Vec::with_capacity(links.len()),
        };

        for (index, url) in links.into_iter().enumerate() {
            tracing::info!("{} {}", index, url);
            sink.begin(index, &url)?;

            let status = match self.extract_work(&url).await {
                Ok(text) => {
                    let chars = text.chars().count();
                    sink.accept(&HarvestedWork {
                        index,
                        url: url.clone(),
                        text,
                    })?;
                    WorkStatus::Extracted { chars }
                }
                Err(e) if self.config.fetch.failure_mode == FailureMode::Skip => {
                    tracing::warn!("Skipping work {}: {}", url, e);
                    WorkStatus::Failed {
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!("Work {} failed: {}", url, e);
                    return Err(e);
                }
            };

            report.works.push(WorkOutcome { index, url, status });
        }

        tracing::info!(
            extracted = report.extracted_count(),
            failed = report.failed_count(),
            "Finished {}",
            catalog_url
        );

        Ok(report)
    }
}
