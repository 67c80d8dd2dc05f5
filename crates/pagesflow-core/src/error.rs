//! Deploy error types

use crate::config::Setting;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by [`crate::Deployer::deploy`]
///
/// A failed upload is not an error: it is reported through
/// [`crate::DeployOutcome`]. Only input that must be fixed before any
/// process can be started ends up here.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Missing required setting: {0}")]
    MissingSetting(Setting),
}

pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors raised by a [`crate::ProcessRunner`]
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    #[error("{program} was interrupted")]
    Interrupted { program: String },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a [`crate::StaticGenerator`]
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("static generation exited with code {code}: {output}")]
    Failed { code: i32, output: String },

    #[error(transparent)]
    Run(#[from] RunError),
}
