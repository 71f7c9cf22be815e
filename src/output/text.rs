//! Work text sinks
//!
//! [`DiscardSink`] drops extracted text; [`TextDirectorySink`] writes one
//! plain-text file per work.

use crate::output::traits::{HarvestedWork, OutputError, OutputResult, WorkSink};
use crate::url::final_segment;
use std::fs;
use std::path::{Path, PathBuf};

/// Sink that drops every work
#[derive(Debug, Default)]
pub struct DiscardSink;

impl WorkSink for DiscardSink {
    fn accept(&mut self, work: &HarvestedWork) -> OutputResult<()> {
        tracing::debug!(chars = work.text.len(), "Discarding text of {}", work.url);
        Ok(())
    }
}

/// Sink writing `NNN_<slug>.txt` files into a directory
#[derive(Debug)]
pub struct TextDirectorySink {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl TextDirectorySink {
    /// Creates the sink, creating `directory` if it does not exist
    pub fn new(directory: &Path) -> OutputResult<Self> {
        fs::create_dir_all(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Files written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path the given work is written to
    pub fn path_for(&self, work: &HarvestedWork) -> PathBuf {
        self.directory
            .join(format!("{:03}_{}.txt", work.index, slugify(final_segment(&work.url))))
    }
}

impl WorkSink for TextDirectorySink {
    fn accept(&mut self, work: &HarvestedWork) -> OutputResult<()> {
        let path = self.path_for(work);
        fs::write(&path, &work.text)
            .map_err(|e| OutputError::Write(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Reduces a URL segment to a file-name-safe slug
///
/// ASCII alphanumerics, `-` and `_` are kept; everything else becomes `_`.
/// An empty result becomes `work`.
pub fn slugify(segment: &str) -> String {
    let slug: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        "work".to_string()
    } else {
        slug
    }
}
