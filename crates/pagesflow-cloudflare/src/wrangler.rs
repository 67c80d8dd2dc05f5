//! wrangler CLI wrapper
//!
//! Checks that the publishing tool can be started before a deploy is
//! attempted. The upload itself goes through [`pagesflow_core::Deployer`].

use crate::error::{CloudflareError, Result};
use pagesflow_core::{ProcessRunner, PublishTool, RunError};

pub struct Wrangler<R> {
    tool: PublishTool,
    runner: R,
}

impl<R: ProcessRunner> Wrangler<R> {
    pub fn new(tool: PublishTool, runner: R) -> Self {
        Self { tool, runner }
    }

    pub fn tool(&self) -> &PublishTool {
        &self.tool
    }

    /// Run `<tool> --version` and return the reported version
    pub async fn version(&self) -> Result<String> {
        let invocation = self.tool.version_invocation();
        tracing::debug!("Running: {}", invocation.command_line());

        let output = match self.runner.run(&invocation).await {
            Ok(output) => output,
            Err(RunError::Spawn { source, .. }) => {
                return Err(CloudflareError::WranglerNotFound(source.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.success() {
            return Err(CloudflareError::CommandFailed(
                output.output.trim().to_string(),
            ));
        }

        Ok(parse_version(&output.output))
    }
}

/// Pick the version line out of `wrangler --version` output
///
/// Newer releases print a banner such as ` ⛅️ wrangler 3.78.2` followed by
/// a separator line; older ones print the bare version.
fn parse_version(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.chars().any(|c| c.is_ascii_digit()))
        .map(|line| {
            line.rsplit(' ')
                .next()
                .unwrap_or(line)
                .to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pagesflow_core::{Invocation, ProcessOutput};

    struct Reply(Option<i32>, &'static str);

    #[async_trait]
    impl ProcessRunner for Reply {
        async fn run(&self, invocation: &Invocation) -> std::result::Result<ProcessOutput, RunError> {
            assert_eq!(invocation.args.last().map(String::as_str), Some("--version"));
            Ok(ProcessOutput::new(self.0, self.1))
        }
    }

    struct Missing;

    #[async_trait]
    impl ProcessRunner for Missing {
        async fn run(&self, invocation: &Invocation) -> std::result::Result<ProcessOutput, RunError> {
            Err(RunError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            })
        }
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("3.22.1\n"), "3.22.1");
        assert_eq!(
            parse_version(" ⛅️ wrangler 3.78.2\n-------------------\n"),
            "3.78.2"
        );
        assert_eq!(parse_version(""), "");
    }

    #[tokio::test]
    async fn test_version_ok() {
        let wrangler = Wrangler::new(PublishTool::wrangler(), Reply(Some(0), "3.22.1\n"));
        assert_eq!(wrangler.version().await.unwrap(), "3.22.1");
    }

    #[tokio::test]
    async fn test_version_command_failed() {
        let wrangler = Wrangler::new(PublishTool::wrangler(), Reply(Some(1), "npm ERR! 404\n"));
        assert!(matches!(
            wrangler.version().await,
            Err(CloudflareError::CommandFailed(msg)) if msg == "npm ERR! 404"
        ));
    }

    #[tokio::test]
    async fn test_version_not_installed() {
        let wrangler = Wrangler::new(PublishTool::wrangler(), Missing);
        assert!(matches!(
            wrangler.version().await,
            Err(CloudflareError::WranglerNotFound(_))
        ));
    }
}
