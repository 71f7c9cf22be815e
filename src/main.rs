//! Wikiscribe main entry point
//!
//! This is the command-line interface for the Wikiscribe harvester.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wikiscribe::config::{load_config_with_hash, AuthorEntry, Config, FailureMode};
use wikiscribe::output::{
    write_markdown_summary, DiscardSink, HarvestedWork, OutputResult, TextDirectorySink, WorkSink,
};
use wikiscribe::Harvester;

/// Wikiscribe: collects an author's works from Wikisource
///
/// Resolves an author catalog page into the author's works, then fetches
/// each work (following chapter sub-pages) and extracts its prose.
#[derive(Parser, Debug)]
#[command(name = "wikiscribe")]
#[command(version)]
#[command(about = "Collects an author's works from Wikisource", long_about = None)]
struct Cli {
    /// Author catalog page URL (overrides [[author]] entries in the config)
    #[arg(value_name = "AUTHOR_URL")]
    author_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Work URL to leave out (repeatable, applies to AUTHOR_URL)
    #[arg(short = 'x', long = "exclude", value_name = "URL", requires = "author_url")]
    exclude: Vec<String>,

    /// Directory receiving one text file per work
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write a markdown harvest summary to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Skip works and sub-pages that fail to download instead of aborting
    #[arg(long)]
    skip_failures: bool,

    /// Only resolve and print the work list
    #[arg(long, conflicts_with = "dry_run")]
    list_only: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::debug!("No configuration file, using built-in Wikisource defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);

    let authors = select_authors(&config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config, &authors);
        return Ok(());
    }

    let harvester = Harvester::new(config)?;

    if cli.list_only {
        handle_list(&harvester, &authors).await?;
    } else {
        handle_harvest(&harvester, &authors).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wikiscribe=info,warn"),
            1 => EnvFilter::new("wikiscribe=debug,info"),
            2 => EnvFilter::new("wikiscribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Folds command-line flags into the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.skip_failures {
        config.fetch.failure_mode = FailureMode::Skip;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.display().to_string());
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }
}

/// Picks the catalogs to harvest: the positional URL, else the config's authors
fn select_authors(config: &Config, cli: &Cli) -> Result<Vec<AuthorEntry>, Box<dyn std::error::Error>> {
    if let Some(url) = &cli.author_url {
        url::Url::parse(url).map_err(|e| format!("Invalid author URL '{}': {}", url, e))?;
        return Ok(vec![AuthorEntry {
            catalog_url: url.clone(),
            exclude: cli.exclude.clone(),
        }]);
    }

    if config.authors.is_empty() {
        return Err("No author given: pass AUTHOR_URL or add [[author]] entries to the config".into());
    }

    Ok(config.authors.clone())
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, authors: &[AuthorEntry]) {
    println!("=== Wikiscribe Dry Run ===\n");

    println!("Source:");
    println!("  Work namespace: {}", config.source.work_namespace_prefix);
    println!("  Excluded labels: {}", config.source.excluded_labels.join(" "));
    println!("  Full-view suffix: {}", config.source.full_view_suffix);

    println!("\nLayout:");
    println!("  Catalog links: {}", config.layout.catalog_links);
    println!("  Work links: {}", config.layout.work_links);
    println!("  Content root: {}", config.layout.content_root);
    println!("  Content wrapper: {}", config.layout.content_wrapper);
    println!("  Paragraph depths: {:?}", config.layout.paragraph_depths);

    println!("\nFetch:");
    match config.fetch.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: none"),
    }
    println!("  Failure mode: {}", config.fetch.failure_mode);
    if let Some(user_agent) = &config.user_agent {
        println!("  User agent: {}", wikiscribe::crawler::format_user_agent(user_agent));
    }

    println!("\nOutput:");
    println!(
        "  Directory: {}",
        config.output.directory.as_deref().unwrap_or("(discard)")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(none)")
    );

    println!("\nAuthors ({}):", authors.len());
    for author in authors {
        println!("  - {} ({} excluded)", author.catalog_url, author.exclude.len());
        for excluded in &author.exclude {
            println!("    * {}", excluded);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --list-only mode: prints resolved works
async fn handle_list(
    harvester: &Harvester,
    authors: &[AuthorEntry],
) -> Result<(), Box<dyn std::error::Error>> {
    for author in authors {
        let links = harvester
            .resolve_author_works(&author.catalog_url, &author.exclude)
            .await?;
        for (index, link) in links.iter().enumerate() {
            println!("{} {}", index, link);
        }
    }
    Ok(())
}

/// Prints each work as it starts, then forwards it to the configured sink
struct ConsoleSink {
    inner: Box<dyn WorkSink>,
}

impl WorkSink for ConsoleSink {
    fn begin(&mut self, index: usize, url: &str) -> OutputResult<()> {
        println!("{} {}", index, url);
        self.inner.begin(index, url)
    }

    fn accept(&mut self, work: &HarvestedWork) -> OutputResult<()> {
        self.inner.accept(work)
    }
}

/// Handles the main harvest operation
async fn handle_harvest(
    harvester: &Harvester,
    authors: &[AuthorEntry],
) -> Result<(), Box<dyn std::error::Error>> {
    let output = &harvester.config().output;
    let inner: Box<dyn WorkSink> = match &output.directory {
        Some(dir) => Box::new(TextDirectorySink::new(Path::new(dir))?),
        None => Box::new(DiscardSink),
    };
    let mut sink = ConsoleSink { inner };

    let mut reports = Vec::with_capacity(authors.len());
    for author in authors {
        match harvester
            .harvest_author(&author.catalog_url, &author.exclude, &mut sink)
            .await
        {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::error!("Harvest failed: {}", e);
                return Err(e.into());
            }
        }
    }

    if let Some(path) = &output.summary_path {
        write_markdown_summary(&reports, Path::new(path))?;
        tracing::info!("Summary written to {}", path);
    }

    Ok(())
}
