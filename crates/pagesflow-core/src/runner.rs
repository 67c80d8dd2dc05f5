//! Process runner abstraction

use crate::error::RunError;
use crate::invocation::Invocation;
use async_trait::async_trait;

/// What a finished child process left behind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// stdout followed by stderr
    pub output: String,
}

impl ProcessOutput {
    pub fn new(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs one external program to completion
///
/// Implementations must honor [`Invocation::timeout`] and must not pass
/// the invocation through a shell.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, RunError>;
}

#[async_trait]
impl<T: ProcessRunner + ?Sized> ProcessRunner for std::sync::Arc<T> {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, RunError> {
        (**self).run(invocation).await
    }
}
