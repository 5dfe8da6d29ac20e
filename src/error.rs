//! Error types for loading boundary data and configuration.

use std::io;
use thiserror::Error;

/// Errors raised while reading boundary input.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file.
    #[error("Failed to read {path}: {source}")]
    Io { path: String, source: io::Error },

    /// Input is not valid GeoJSON.
    #[error("Invalid GeoJSON: {0}")]
    Parse(#[from] simd_json::Error),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] simd_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
