//! Configuration module for Wikiscribe
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wikiscribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wikiscribe.toml")).unwrap();
//! println!("Work namespace: {}", config.source.work_namespace_prefix);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AuthorEntry, Config, FailureMode, FetchConfig, LayoutConfig, OutputConfig, SourceConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
