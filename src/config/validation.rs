//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Base URL must be an absolute `http` URL the client can reach
//! - Asset allow-list must be non-empty, unique, and not already suffixed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FetchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use url::Url;

use crate::config::schema::FetchConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "assets.files").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &FetchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.client.base_url) {
        Ok(url) if url.scheme() != "http" => errors.push(ValidationError::new(
            "client.base_url",
            format!("unsupported scheme '{}', only http is supported", url.scheme()),
        )),
        Ok(url) if url.cannot_be_a_base() => errors.push(ValidationError::new(
            "client.base_url",
            "URL cannot be used as a base",
        )),
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::new(
            "client.base_url",
            format!("invalid URL '{}': {}", config.client.base_url, e),
        )),
    }

    if config.client.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "client.connect_timeout_secs",
            "must be greater than 0",
        ));
    }

    let suffix = &config.assets.compressed_suffix;
    if suffix.is_empty() {
        errors.push(ValidationError::new(
            "assets.compressed_suffix",
            "must not be empty",
        ));
    }

    if config.assets.files.is_empty() {
        errors.push(ValidationError::new("assets.files", "must list at least one asset"));
    }

    let mut seen = HashSet::new();
    for file in &config.assets.files {
        if file.is_empty() {
            errors.push(ValidationError::new("assets.files", "contains an empty name"));
        } else if !seen.insert(file.as_str()) {
            errors.push(ValidationError::new(
                "assets.files",
                format!("duplicate asset '{}'", file),
            ));
        } else if !suffix.is_empty() && file.ends_with(suffix.as_str()) {
            errors.push(ValidationError::new(
                "assets.files",
                format!("asset '{}' already carries the compressed suffix '{}'", file, suffix),
            ));
        }
    }

    if config.decompression.chunk_size == 0 {
        errors.push(ValidationError::new(
            "decompression.chunk_size",
            "must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
