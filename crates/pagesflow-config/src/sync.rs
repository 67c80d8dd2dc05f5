//! Cloudflare連携設定 (pagesflow.cloudflare_sync)

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

pub const ACCOUNT_ID_KEY: &str = "cloudflare_account_id";
pub const API_TOKEN_KEY: &str = "cloudflare_api_token";
pub const PROJECT_NAME_KEY: &str = "cloudflare_project_name";

/// 保存値より優先される環境変数
pub const ACCOUNT_ID_ENV: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";
pub const PROJECT_NAME_ENV: &str = "CLOUDFLARE_PROJECT_NAME";

/// Cloudflare Pagesへのデプロイに使う3つの設定値
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare_api_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudflare_project_name: Option<String>,
}

impl SyncSettings {
    /// 入力値から設定を作成（3項目とも必須）
    pub fn new(
        account_id: impl Into<String>,
        api_token: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Result<Self> {
        let settings = Self {
            cloudflare_account_id: Some(account_id.into()),
            cloudflare_api_token: Some(api_token.into()),
            cloudflare_project_name: Some(project_name.into()),
        };

        if let Some(key) = settings.missing().first().copied() {
            return Err(ConfigError::RequiredField(key));
        }

        Ok(settings)
    }

    /// 環境変数が設定されていれば保存値を上書き
    pub fn with_env_overrides(mut self) -> Self {
        let from_env = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        if let Some(v) = from_env(ACCOUNT_ID_ENV) {
            self.cloudflare_account_id = Some(v);
        }
        if let Some(v) = from_env(API_TOKEN_ENV) {
            self.cloudflare_api_token = Some(v);
        }
        if let Some(v) = from_env(PROJECT_NAME_ENV) {
            self.cloudflare_project_name = Some(v);
        }
        self
    }

    /// 未入力の項目のキー
    pub fn missing(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.cloudflare_account_id) {
            missing.push(ACCOUNT_ID_KEY);
        }
        if blank(&self.cloudflare_api_token) {
            missing.push(API_TOKEN_KEY);
        }
        if blank(&self.cloudflare_project_name) {
            missing.push(PROJECT_NAME_KEY);
        }
        missing
    }

    /// 表示用にマスクしたAPIトークン
    pub fn masked_api_token(&self) -> Option<String> {
        self.cloudflare_api_token.as_deref().map(mask_secret)
    }
}

impl std::fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncSettings")
            .field("cloudflare_account_id", &self.cloudflare_account_id)
            .field("cloudflare_api_token", &self.masked_api_token())
            .field("cloudflare_project_name", &self.cloudflare_project_name)
            .finish()
    }
}

/// 末尾4文字以外を伏せる（短い値は全て伏せる）
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("********{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_new_requires_all_fields() {
        assert!(SyncSettings::new("acc1", "tok1", "proj1").is_ok());

        let err = SyncSettings::new("acc1", "", "proj1").unwrap_err();
        assert!(matches!(err, ConfigError::RequiredField(API_TOKEN_KEY)));

        let err = SyncSettings::new("acc1", "tok1", "   ").unwrap_err();
        assert!(matches!(err, ConfigError::RequiredField(PROJECT_NAME_KEY)));
    }

    #[test]
    fn test_missing_on_default() {
        assert_eq!(
            SyncSettings::default().missing(),
            vec![ACCOUNT_ID_KEY, API_TOKEN_KEY, PROJECT_NAME_KEY]
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides_stored_values() {
        let stored = SyncSettings::new("acc1", "tok1", "proj1").unwrap();

        temp_env::with_vars(
            [
                (ACCOUNT_ID_ENV, Some("acc-env")),
                (API_TOKEN_ENV, None),
                (PROJECT_NAME_ENV, Some("")),
            ],
            || {
                let settings = stored.clone().with_env_overrides();
                assert_eq!(settings.cloudflare_account_id.as_deref(), Some("acc-env"));
                assert_eq!(settings.cloudflare_api_token.as_deref(), Some("tok1"));
                // 空の環境変数は無視
                assert_eq!(settings.cloudflare_project_name.as_deref(), Some("proj1"));
            },
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "********");
        assert_eq!(mask_secret("abcdefghijkl"), "********ijkl");
    }

    #[test]
    fn test_debug_masks_token() {
        let settings = SyncSettings::new("acc1", "super-secret-token", "proj1").unwrap();
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("oken"));
    }
}
