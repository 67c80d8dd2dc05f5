//! Publishing tool command construction

use crate::config::DeployConfig;
use std::fmt;
use std::time::Duration;

/// Child environment variable carrying the Cloudflare account ID
pub const ACCOUNT_ID_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Child environment variable carrying the Cloudflare API token
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// A program to run with an argument list and extra environment
///
/// Arguments are passed to the program as-is, never through a shell.
/// Environment entries apply to the child only.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up an environment entry set for the child
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Program and arguments joined for logs and diagnostics
    ///
    /// Environment values are not part of the output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.envs.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env_keys", &env_keys)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The external CLI that uploads a directory to Cloudflare Pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTool {
    pub program: String,
    /// Arguments placed before the `pages deploy` subcommand
    pub prefix_args: Vec<String>,
}

impl PublishTool {
    pub fn new(program: impl Into<String>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    /// `npx wrangler`
    pub fn wrangler() -> Self {
        Self::new("npx", vec!["wrangler".to_string()])
    }

    /// Build `<program> <prefix…> pages deploy <content> --project-name=<name>`
    pub fn invocation(&self, config: &DeployConfig) -> Invocation {
        Invocation::new(&self.program)
            .args(self.prefix_args.iter().cloned())
            .args(["pages", "deploy"])
            .arg(config.content_path.to_string_lossy())
            .arg(format!("--project-name={}", config.project_name))
            .env(ACCOUNT_ID_ENV, &config.account_id)
            .env(API_TOKEN_ENV, config.api_token.expose())
    }

    /// Build `<program> <prefix…> --version`
    pub fn version_invocation(&self) -> Invocation {
        Invocation::new(&self.program)
            .args(self.prefix_args.iter().cloned())
            .arg("--version")
    }
}

impl Default for PublishTool {
    fn default() -> Self {
        Self::wrangler()
    }
}
