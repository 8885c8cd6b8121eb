use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while checking or typesetting a recipe
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The recipe is not well-formed YAML, or not shaped like a recipe
    #[error("Failed to parse recipe: {0}")]
    ParseError(#[from] serde_yaml_ng::Error),

    /// The recipe parsed but lacks something the pipeline needs
    #[error("Invalid recipe data: {0}")]
    DataError(String),

    /// Invalid checker mode or other bad setting
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Template could not be loaded or references a missing field
    #[error("Template error: {0}")]
    TemplateError(String),

    /// A checking engine failed or answered with something unusable
    #[error("Checker error: {0}")]
    CheckerError(String),

    /// HTTP round-trip to the checking server failed
    #[error("Checker request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl RecipeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecipeError::IoError {
            path: path.into(),
            source,
        }
    }
}
