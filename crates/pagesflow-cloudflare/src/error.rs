//! Cloudflare backend error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudflareError {
    #[error("wrangler not found ({0}). Please install: npm install -g wrangler")]
    WranglerNotFound(String),

    #[error("wrangler command failed: {0}")]
    CommandFailed(String),

    #[error("Cloudflare API error: {0}")]
    ApiError(String),

    #[error("Pages project not found: {0}")]
    ProjectNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Process error: {0}")]
    Run(#[from] pagesflow_core::RunError),
}

pub type Result<T> = std::result::Result<T, CloudflareError>;
