//! Static site generation
//!
//! The crawl itself belongs to an external generator. This module only
//! defines the contract and a runner-backed implementation that shells out
//! to the generator command.

use crate::error::GenerateError;
use crate::invocation::Invocation;
use crate::runner::ProcessRunner;
use async_trait::async_trait;
use std::time::Duration;

/// Placeholder replaced by the base URL in generator arguments
pub const BASE_URL_PLACEHOLDER: &str = "{base_url}";

/// Summary of a finished generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub base_url: String,
    pub output: String,
}

#[async_trait]
pub trait StaticGenerator: Send + Sync {
    /// Crawl the site at `base_url` and write static files
    async fn generate(&self, base_url: &str) -> Result<GenerationReport, GenerateError>;
}

/// Generator that runs an external command, e.g. `drush tome:static`
pub struct CommandGenerator<R> {
    runner: R,
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl<R: ProcessRunner> CommandGenerator<R> {
    pub fn new(runner: R, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn invocation(&self, base_url: &str) -> Invocation {
        Invocation::new(&self.program)
            .args(
                self.args
                    .iter()
                    .map(|a| a.replace(BASE_URL_PLACEHOLDER, base_url)),
            )
            .with_timeout(self.timeout)
    }
}

#[async_trait]
impl<R: ProcessRunner> StaticGenerator for CommandGenerator<R> {
    async fn generate(&self, base_url: &str) -> Result<GenerationReport, GenerateError> {
        if base_url.trim().is_empty() {
            return Err(GenerateError::EmptyBaseUrl);
        }

        let invocation = self.invocation(base_url);
        tracing::info!("Generating static site from {}", base_url);
        tracing::debug!("Running: {}", invocation.command_line());

        let output = self.runner.run(&invocation).await?;
        if !output.success() {
            return Err(GenerateError::Failed {
                code: output.exit_code.unwrap_or(-1),
                output: output.output,
            });
        }

        Ok(GenerationReport {
            base_url: base_url.to_string(),
            output: output.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use crate::runner::ProcessOutput;
    use std::sync::Mutex;

    struct FixedRunner {
        exit_code: i32,
        seen: Mutex<Option<Invocation>>,
    }

    #[async_trait]
    impl ProcessRunner for FixedRunner {
        async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, RunError> {
            *self.seen.lock().unwrap() = Some(invocation.clone());
            Ok(ProcessOutput::new(Some(self.exit_code), "Generated 12 pages"))
        }
    }

    fn generator(exit_code: i32) -> CommandGenerator<FixedRunner> {
        CommandGenerator::new(
            FixedRunner {
                exit_code,
                seen: Mutex::new(None),
            },
            "drush",
            vec![
                "tome:static".to_string(),
                "--uri={base_url}".to_string(),
                "--yes".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_base_url_is_substituted() {
        let generator = generator(0);
        let report = generator.generate("https://127.0.0.1/").await.unwrap();

        assert_eq!(report.base_url, "https://127.0.0.1/");
        assert_eq!(report.output, "Generated 12 pages");

        let seen = generator.runner.seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            seen.command_line(),
            "drush tome:static --uri=https://127.0.0.1/ --yes"
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_fails() {
        let result = generator(3).generate("https://127.0.0.1/").await;
        assert!(matches!(result, Err(GenerateError::Failed { code: 3, .. })));
    }

    #[tokio::test]
    async fn test_empty_base_url_is_rejected() {
        let generator = generator(0);
        let result = generator.generate(" ").await;

        assert!(matches!(result, Err(GenerateError::EmptyBaseUrl)));
        assert!(generator.runner.seen.lock().unwrap().is_none());
    }
}
