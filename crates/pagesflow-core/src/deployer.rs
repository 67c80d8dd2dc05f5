//! Deploy orchestration
//!
//! Builds the publishing tool invocation from a [`DeployConfig`], runs it
//! once through a [`ProcessRunner`] and turns the result into a
//! [`DeployOutcome`].

use crate::config::DeployConfig;
use crate::error::{Result, RunError};
use crate::invocation::{Invocation, PublishTool};
use crate::message::MessageSink;
use crate::outcome::{DeployOutcome, OutcomeKind, SPAWN_FAILURE_EXIT_CODE};
use crate::runner::{ProcessOutput, ProcessRunner};
use std::sync::Arc;
use std::time::Duration;

pub struct Deployer<R> {
    runner: R,
    tool: PublishTool,
    sink: Arc<dyn MessageSink>,
    timeout: Option<Duration>,
}

impl<R: ProcessRunner> Deployer<R> {
    pub fn new(runner: R, tool: PublishTool, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            runner,
            tool,
            sink,
            timeout: None,
        }
    }

    /// Kill the publishing tool if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn tool(&self) -> &PublishTool {
        &self.tool
    }

    /// The invocation [`Deployer::deploy`] would run for `config`
    pub fn invocation(&self, config: &DeployConfig) -> Invocation {
        self.tool.invocation(config).with_timeout(self.timeout)
    }

    /// Upload `config.content_path` to the configured Pages project
    ///
    /// Returns `Err` only when a required setting is empty, in which case
    /// no process is started. Every other result, including a failed
    /// upload, is an `Ok(DeployOutcome)`. The runner is called exactly once.
    pub async fn deploy(&self, config: &DeployConfig) -> Result<DeployOutcome> {
        config.validate()?;

        let invocation = self.invocation(config);
        tracing::info!(
            project = %config.project_name,
            "Publishing {} to Cloudflare Pages",
            config.content_path.display()
        );
        tracing::debug!("Running: {}", invocation.command_line());

        let outcome = match self.runner.run(&invocation).await {
            Ok(output) => classify(&invocation, output),
            Err(e) => from_run_error(e),
        };

        let outcome = DeployOutcome {
            message: config.api_token.scrub(&outcome.message),
            raw_output: config.api_token.scrub(&outcome.raw_output),
            ..outcome
        };

        if outcome.success {
            tracing::info!("Deploy finished: {}", outcome.kind);
            self.sink.status(&outcome.message);
        } else {
            tracing::warn!(
                exit_code = outcome.exit_code,
                "Deploy failed: {}",
                outcome.kind
            );
            self.sink.error(&outcome.message);
        }

        Ok(outcome)
    }
}

fn classify(invocation: &Invocation, output: ProcessOutput) -> DeployOutcome {
    match output.exit_code {
        Some(0) => DeployOutcome::succeeded(output.output),
        Some(code) => {
            let diagnostic = with_output(
                format!("`{}` exited with code {}", invocation.command_line(), code),
                &output.output,
            );
            DeployOutcome::failed(OutcomeKind::DeploymentError, &diagnostic, code, output.output)
        }
        None => {
            let diagnostic = with_output(
                format!("`{}` was terminated by a signal", invocation.command_line()),
                &output.output,
            );
            DeployOutcome::failed(
                OutcomeKind::DeploymentError,
                &diagnostic,
                SPAWN_FAILURE_EXIT_CODE,
                output.output,
            )
        }
    }
}

fn from_run_error(error: RunError) -> DeployOutcome {
    let kind = match error {
        RunError::Timeout { .. } => OutcomeKind::Timeout,
        RunError::Interrupted { .. } => OutcomeKind::DeploymentError,
        RunError::Spawn { .. } | RunError::Wait { .. } => OutcomeKind::SpawnError,
    };
    DeployOutcome::failed(kind, &error.to_string(), SPAWN_FAILURE_EXIT_CODE, "")
}

fn with_output(summary: String, output: &str) -> String {
    let output = output.trim_end();
    if output.is_empty() {
        summary
    } else {
        format!("{}\n\n{}", summary, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use crate::invocation::{ACCOUNT_ID_ENV, API_TOKEN_ENV};
    use crate::message::{MemorySink, MessageLevel};
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Respond = Box<dyn Fn() -> std::result::Result<ProcessOutput, RunError> + Send + Sync>;

    struct StubRunner {
        calls: Mutex<Vec<Invocation>>,
        respond: Respond,
    }

    impl StubRunner {
        fn new(respond: Respond) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                respond,
            }
        }

        fn exiting(code: i32, output: &'static str) -> Self {
            Self::new(Box::new(move || Ok(ProcessOutput::new(Some(code), output))))
        }

        fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProcessRunner for StubRunner {
        async fn run(
            &self,
            invocation: &Invocation,
        ) -> std::result::Result<ProcessOutput, RunError> {
            self.calls.lock().unwrap().push(invocation.clone());
            (self.respond)()
        }
    }

    fn config() -> DeployConfig {
        DeployConfig::new("acc1", "tok1", "proj1", "/tmp/site")
    }

    fn deployer(runner: Arc<StubRunner>) -> (Deployer<Arc<StubRunner>>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let deployer = Deployer::new(runner, PublishTool::wrangler(), sink.clone());
        (deployer, sink)
    }

    #[tokio::test]
    async fn test_empty_setting_is_configuration_error_without_spawn() {
        let runner = Arc::new(StubRunner::exiting(0, ""));
        let (deployer, _sink) = deployer(runner.clone());

        let cases = [
            DeployConfig::new("", "tok1", "proj1", "/tmp/site"),
            DeployConfig::new("acc1", "", "proj1", "/tmp/site"),
            DeployConfig::new("acc1", "tok1", "", "/tmp/site"),
            DeployConfig::new("acc1", "tok1", "proj1", ""),
        ];

        for config in cases {
            let result = deployer.deploy(&config).await;
            assert!(matches!(result, Err(DeployError::MissingSetting(_))));
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exit_zero_is_success() {
        let runner = Arc::new(StubRunner::exiting(0, "✨ Success"));
        let (deployer, sink) = deployer(runner.clone());

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.raw_output, "✨ Success");
        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert!(outcome.message.contains("Successfully published"));
        assert_eq!(
            sink.messages(),
            vec![(MessageLevel::Status, outcome.message.clone())]
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_deployment_error() {
        let runner = Arc::new(StubRunner::exiting(1, "✘ [ERROR] Project not found"));
        let (deployer, sink) = deployer(runner);

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.kind, OutcomeKind::DeploymentError);
        assert!(outcome.message.contains("Failed to publish"));
        assert!(outcome.message.contains("Project not found"));
        assert_eq!(sink.messages()[0].0, MessageLevel::Error);
    }

    #[tokio::test]
    async fn test_spawn_failure_uses_sentinel_exit_code() {
        let runner = Arc::new(StubRunner::new(Box::new(|| {
            Err(RunError::Spawn {
                program: "npx".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            })
        })));
        let (deployer, _sink) = deployer(runner);

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.kind, OutcomeKind::SpawnError);
        assert_eq!(outcome.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert!(outcome.message.contains("No such file"));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let runner = Arc::new(StubRunner::new(Box::new(|| {
            Err(RunError::Timeout {
                program: "npx".to_string(),
                after: Duration::from_secs(5),
            })
        })));
        let (deployer, _sink) = deployer(runner.clone());
        let deployer = deployer.with_timeout(Some(Duration::from_secs(5)));

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert_eq!(outcome.kind, OutcomeKind::Timeout);
        assert_eq!(outcome.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert_eq!(runner.calls()[0].timeout, Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn test_interrupted_run_is_deployment_error() {
        let runner = Arc::new(StubRunner::new(Box::new(|| {
            Err(RunError::Interrupted {
                program: "npx".to_string(),
            })
        })));
        let (deployer, _sink) = deployer(runner);

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.kind, OutcomeKind::DeploymentError);
        assert_eq!(outcome.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert!(outcome.message.contains("interrupted"));
    }

    #[tokio::test]
    async fn test_credentials_go_to_env_only() {
        let runner = Arc::new(StubRunner::exiting(0, ""));
        let (deployer, _sink) = deployer(runner.clone());

        deployer.deploy(&config()).await.unwrap();

        let calls = runner.calls();
        let invocation = &calls[0];
        assert_eq!(invocation.env_value(ACCOUNT_ID_ENV), Some("acc1"));
        assert_eq!(invocation.env_value(API_TOKEN_ENV), Some("tok1"));
        assert!(invocation.args.iter().any(|a| a.contains("proj1")));
        assert!(invocation.args.iter().any(|a| a == "/tmp/site"));
        assert!(invocation.args.iter().all(|a| !a.contains("tok1")));
    }

    #[tokio::test]
    async fn test_each_deploy_spawns_once() {
        let runner = Arc::new(StubRunner::exiting(1, ""));
        let (deployer, _sink) = deployer(runner.clone());

        deployer.deploy(&config()).await.unwrap();
        deployer.deploy(&config()).await.unwrap();

        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_token_is_scrubbed_from_output() {
        let runner = Arc::new(StubRunner::exiting(1, "Authentication error for token tok1"));
        let (deployer, sink) = deployer(runner);

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(!outcome.raw_output.contains("tok1"));
        assert!(!outcome.message.contains("tok1"));
        assert!(sink.messages().iter().all(|(_, text)| !text.contains("tok1")));
    }

    #[tokio::test]
    async fn test_signal_termination_is_failure() {
        let runner = Arc::new(StubRunner::new(Box::new(|| {
            Ok(ProcessOutput::new(None, "partial upload"))
        })));
        let (deployer, _sink) = deployer(runner);

        let outcome = deployer.deploy(&config()).await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.kind, OutcomeKind::DeploymentError);
        assert_eq!(outcome.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert_eq!(outcome.raw_output, "partial upload");
    }
}
