use crate::config::types::{CatalogConfig, Config, OutputConfig, TaskEntry};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_output_config(&config.output)?;
    validate_tasks(&config.tasks)?;
    Ok(())
}

/// Validates catalog endpoint configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    validate_endpoint_url("api-url", &config.api_url)?;

    if let Some(sign_url) = &config.sign_url {
        validate_endpoint_url("sign-url", sign_url)?;
    }

    if config.collection.is_empty() {
        return Err(ConfigError::Validation(
            "collection cannot be empty".to_string(),
        ));
    }

    if !matches!(config.orbit_state.as_str(), "ascending" | "descending") {
        return Err(ConfigError::Validation(format!(
            "orbit-state must be 'ascending' or 'descending', got '{}'",
            config.orbit_state
        )));
    }

    if config.instrument_mode.is_empty() {
        return Err(ConfigError::Validation(
            "instrument-mode cannot be empty".to_string(),
        ));
    }

    if let Some(limit) = config.limit {
        if limit < 1 {
            return Err(ConfigError::Validation(format!(
                "limit must be >= 1, got {}",
                limit
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates task entries: well-formed descriptors and unique names
fn validate_tasks(tasks: &[TaskEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in tasks {
        if entry.name.is_empty() {
            return Err(ConfigError::Validation(
                "task name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate task name '{}'",
                entry.name
            )));
        }

        // Descriptor invariants (bbox ordering, time range ordering)
        entry.to_task()?;
    }

    Ok(())
}

/// Validates that an endpoint is a well-formed http(s) URL
fn validate_endpoint_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "Invalid {}: scheme must be http or https, got '{}'",
            key,
            url.scheme()
        )));
    }

    Ok(())
}
