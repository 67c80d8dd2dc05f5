//! 設定スコープのYAML保存
//!
//! スコープごとに `<config_dir>/<scope>.yml` を1ファイル持つ。

use crate::error::{ConfigError, Result};
use crate::sync::SyncSettings;
use crate::tools::ToolSettings;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Cloudflare連携設定のスコープ名
pub const SYNC_SCOPE: &str = "pagesflow.cloudflare_sync";

/// 外部ツール設定のスコープ名
pub const SETTINGS_SCOPE: &str = "pagesflow.settings";

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scope_path(&self, scope: &str) -> PathBuf {
        self.dir.join(format!("{}.yml", scope))
    }

    /// スコープを読み込む（ファイルがなければ既定値）
    pub fn load<T: DeserializeOwned + Default>(&self, scope: &str) -> Result<T> {
        let path = self.scope_path(scope);
        if !path.exists() {
            tracing::debug!("Config scope {} not found, using defaults", scope);
            return Ok(T::default());
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// スコープを保存する
    ///
    /// `private` の場合、Unixでは所有者のみ読み書き可能 (0600) で作成し、
    /// 既存ファイルも書き込み前に 0600 にする
    pub fn save<T: Serialize>(&self, scope: &str, value: &T, private: bool) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.scope_path(scope);
        let content = serde_yaml::to_string(value)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        if private {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path)?;

        #[cfg(unix)]
        if private {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        #[cfg(not(unix))]
        let _ = private;

        file.write_all(content.as_bytes())?;

        tracing::debug!("Saved config scope {}", scope);
        Ok(())
    }

    pub fn load_sync(&self) -> Result<SyncSettings> {
        self.load(SYNC_SCOPE)
    }

    pub fn save_sync(&self, settings: &SyncSettings) -> Result<()> {
        self.save(SYNC_SCOPE, settings, true)
    }

    pub fn load_tools(&self) -> Result<ToolSettings> {
        self.load(SETTINGS_SCOPE)
    }

    pub fn save_tools(&self, settings: &ToolSettings) -> Result<()> {
        self.save(SETTINGS_SCOPE, settings, false)
    }
}
