//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a harvest:
//! the catalog resolved, totals, and the outcome of every work.

use crate::output::traits::{HarvestReport, OutputResult, WorkStatus};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary of `reports` to `output_path`
pub fn write_markdown_summary(reports: &[HarvestReport], output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(reports);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats harvest reports as markdown, one section per author catalog
pub fn format_markdown_summary(reports: &[HarvestReport]) -> String {
    let mut md = String::new();

    md.push_str("# Wikiscribe Harvest Summary\n\n");

    for report in reports {
        md.push_str(&format!("## {}\n\n", report.catalog_url));
        md.push_str(&format!("- **Works Resolved**: {}\n", report.works.len()));
        md.push_str(&format!("- **Extracted**: {}\n", report.extracted_count()));
        md.push_str(&format!("- **Failed**: {}\n", report.failed_count()));
        md.push_str(&format!(
            "- **Characters**: {}\n\n",
            report.total_chars()
        ));

        if report.works.is_empty() {
            md.push_str("No works found.\n\n");
            continue;
        }

        md.push_str("| # | Work | Result |\n");
        md.push_str("|---|------|--------|\n");
        for work in &report.works {
            let result = match &work.status {
                WorkStatus::Extracted { chars } => format!("{} chars", chars),
                WorkStatus::Failed { message } => format!("failed: {}", escape_cell(message)),
            };
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                work.index,
                escape_cell(&work.url),
                result
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps a value from breaking out of its table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
