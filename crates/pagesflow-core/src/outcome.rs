//! Deploy outcome

use serde::{Deserialize, Serialize};

/// Exit code reported when no exit code exists
/// (spawn failure, timeout, killed by signal)
pub const SPAWN_FAILURE_EXIT_CODE: i32 = -1;

pub const SUCCESS_MESSAGE: &str = "Successfully published static content.";
pub const FAILURE_PREFIX: &str = "Failed to publish static content: ";

/// How a deploy attempt ended
///
/// `Display` prints the same name the kind is serialized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The publishing tool exited with 0
    Success,
    /// The publishing tool could not be started
    SpawnError,
    /// The publishing tool ran and failed
    DeploymentError,
    /// The publishing tool was killed after the configured timeout
    Timeout,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::SpawnError => "spawn_error",
            OutcomeKind::DeploymentError => "deployment_error",
            OutcomeKind::Timeout => "timeout",
        }
    }
}

/// Result of one deploy attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployOutcome {
    pub success: bool,
    pub message: String,
    pub exit_code: i32,
    pub raw_output: String,
    pub kind: OutcomeKind,
}

impl DeployOutcome {
    pub fn succeeded(raw_output: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            exit_code: 0,
            raw_output: raw_output.into(),
            kind: OutcomeKind::Success,
        }
    }

    pub fn failed(
        kind: OutcomeKind,
        diagnostic: &str,
        exit_code: i32,
        raw_output: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            message: format!("{}{}", FAILURE_PREFIX, diagnostic),
            exit_code,
            raw_output: raw_output.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message_prefix() {
        let outcome = DeployOutcome::failed(OutcomeKind::SpawnError, "not found", -1, "");
        assert_eq!(
            outcome.message,
            "Failed to publish static content: not found"
        );
        assert!(!outcome.success);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&OutcomeKind::DeploymentError).unwrap();
        assert_eq!(json, "\"deployment_error\"");
    }

    #[test]
    fn test_display_matches_serialized_name() {
        for kind in [
            OutcomeKind::Success,
            OutcomeKind::SpawnError,
            OutcomeKind::DeploymentError,
            OutcomeKind::Timeout,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
