// src/error.rs
use crate::config::ConfigError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use warp::reject::Reject;

/// Failures outside the page actions: startup and rendering.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Debug)]
pub struct CustomError {
    pub message: String,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CustomError {}

impl Reject for CustomError {}

impl From<AppError> for CustomError {
    fn from(e: AppError) -> Self {
        CustomError {
            message: e.to_string(),
        }
    }
}
