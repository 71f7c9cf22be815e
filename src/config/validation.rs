use crate::config::types::{
    AuthorEntry, Config, FetchConfig, LayoutConfig, SourceConfig, UserAgentConfig,
};
use crate::crawler::compile_selector;
use crate::ConfigError;
use url::Url;

/// Deepest wrapper nesting a paragraph locator may descend through
const MAX_PARAGRAPH_DEPTH: usize = 8;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_layout_config(&config.layout)?;
    validate_fetch_config(&config.fetch)?;
    if let Some(user_agent) = &config.user_agent {
        validate_user_agent_config(user_agent)?;
    }
    validate_authors(&config.authors)?;
    Ok(())
}

/// Validates the work-namespace rules
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let prefix = &config.work_namespace_prefix;
    validate_http_url(prefix, "work-namespace-prefix")?;

    // Compared against everything before the last '/', so it can never end in one
    if prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "work-namespace-prefix must not end with '/', got '{}'",
            prefix
        )));
    }

    if config.excluded_labels.iter().any(|label| label.is_empty()) {
        return Err(ConfigError::Validation(
            "excluded-labels cannot contain an empty label".to_string(),
        ));
    }

    if config.full_view_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "full-view-suffix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every layout selector compiles
fn validate_layout_config(config: &LayoutConfig) -> Result<(), ConfigError> {
    compile_selector(&config.catalog_links)?;
    compile_selector(&config.work_links)?;
    compile_selector(&config.content_root)?;
    compile_selector(&config.content_wrapper)?;

    if config.paragraph_depths.is_empty() {
        return Err(ConfigError::Validation(
            "paragraph-depths must list at least one depth".to_string(),
        ));
    }

    if let Some(depth) = config
        .paragraph_depths
        .iter()
        .find(|depth| **depth > MAX_PARAGRAPH_DEPTH)
    {
        return Err(ConfigError::Validation(format!(
            "paragraph-depths entries must be <= {}, got {}",
            MAX_PARAGRAPH_DEPTH, depth
        )));
    }

    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1 when set".to_string(),
        ));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates author catalog entries
fn validate_authors(authors: &[AuthorEntry]) -> Result<(), ConfigError> {
    for author in authors {
        validate_http_url(&author.catalog_url, "catalog-url")?;

        for excluded in &author.exclude {
            Url::parse(excluded).map_err(|e| {
                ConfigError::InvalidUrl(format!("Invalid exclude URL '{}': {}", excluded, e))
            })?;
        }
    }

    Ok(())
}

/// Checks that a value parses as an http or https URL
fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
