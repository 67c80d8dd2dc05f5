//! Deploy settings as seen by the deployer

use crate::error::{DeployError, Result};
use std::fmt;
use std::path::PathBuf;

/// Cloudflare API token
///
/// `Debug` and `Display` never print the value. Use [`ApiToken::expose`]
/// at the single place the token is handed to a child process.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ApiToken(String);

impl ApiToken {
    pub const REDACTED: &'static str = "[REDACTED]";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Replace every occurrence of the token in `text`
    pub fn scrub(&self, text: &str) -> String {
        if self.is_blank() {
            return text.to_string();
        }
        text.replace(self.0.as_str(), Self::REDACTED)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::REDACTED)
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::REDACTED)
    }
}

/// One of the settings a deploy needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    AccountId,
    ApiToken,
    ProjectName,
    ContentPath,
}

impl Setting {
    /// Key under which the setting is stored
    pub fn key(&self) -> &'static str {
        match self {
            Setting::AccountId => "cloudflare_account_id",
            Setting::ApiToken => "cloudflare_api_token",
            Setting::ProjectName => "cloudflare_project_name",
            Setting::ContentPath => "static_content_path",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything needed for one upload to Cloudflare Pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub account_id: String,
    pub api_token: ApiToken,
    pub project_name: String,
    /// Directory whose contents are uploaded
    pub content_path: PathBuf,
}

impl DeployConfig {
    pub fn new(
        account_id: impl Into<String>,
        api_token: impl Into<String>,
        project_name: impl Into<String>,
        content_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: ApiToken::new(api_token),
            project_name: project_name.into(),
            content_path: content_path.into(),
        }
    }

    /// Check that no required setting is empty
    ///
    /// Whitespace-only values count as empty. The first missing setting is
    /// reported, in storage order.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(DeployError::MissingSetting(Setting::AccountId));
        }
        if self.api_token.is_blank() {
            return Err(DeployError::MissingSetting(Setting::ApiToken));
        }
        if self.project_name.trim().is_empty() {
            return Err(DeployError::MissingSetting(Setting::ProjectName));
        }
        if self.content_path.as_os_str().is_empty() {
            return Err(DeployError::MissingSetting(Setting::ContentPath));
        }
        Ok(())
    }
}
