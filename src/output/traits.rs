//! Output handler traits and types
//!
//! This module defines the sink interface extracted works are handed to and
//! the report describing a finished harvest.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One extracted work, as handed to a [`WorkSink`]
#[derive(Debug, Clone)]
pub struct HarvestedWork {
    /// Position of the work in the resolved catalog list (0-based)
    pub index: usize,

    /// The work page URL
    pub url: String,

    /// Concatenated prose of the work
    pub text: String,
}

/// Receives works as a harvest produces them
pub trait WorkSink {
    /// Called before a work is extracted
    fn begin(&mut self, _index: usize, _url: &str) -> OutputResult<()> {
        Ok(())
    }

    /// Stores (or drops) an extracted work
    fn accept(&mut self, work: &HarvestedWork) -> OutputResult<()>;
}

/// Outcome of one work in a harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkStatus {
    /// Text was extracted; `chars` may be zero
    Extracted { chars: usize },
    /// Extraction failed and was skipped
    Failed { message: String },
}

/// Per-work entry of a [`HarvestReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOutcome {
    pub index: usize,
    pub url: String,
    pub status: WorkStatus,
}

/// Summary of one author harvest
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// The author catalog page that was resolved
    pub catalog_url: String,

    /// One entry per resolved work, in catalog order
    pub works: Vec<WorkOutcome>,
}

impl HarvestReport {
    /// Number of works whose text was extracted
    pub fn extracted_count(&self) -> usize {
        self.works
            .iter()
            .filter(|work| matches!(work.status, WorkStatus::Extracted { .. }))
            .count()
    }

    /// Number of works skipped after a failure
    pub fn failed_count(&self) -> usize {
        self.works.len() - self.extracted_count()
    }

    /// Total characters extracted across all works
    pub fn total_chars(&self) -> usize {
        self.works
            .iter()
            .map(|work| match work.status {
                WorkStatus::Extracted { chars } => chars,
                WorkStatus::Failed { .. } => 0,
            })
            .sum()
    }
}
