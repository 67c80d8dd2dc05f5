#![allow(deprecated)]

use assert_cmd::Command;
use pagesflow_config::{ConfigStore, SyncSettings, ToolSettings};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 作業ディレクトリと設定ディレクトリを分けたテスト環境
pub struct TestSite {
    pub root: TempDir,
}

impl TestSite {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("config")).unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.config_dir())
    }

    /// 環境のCloudflare変数に影響されない pagesflow コマンド
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pagesflow").unwrap();
        cmd.current_dir(self.path())
            .env("PAGESFLOW_CONFIG_DIR", self.config_dir())
            .env_remove("CLOUDFLARE_ACCOUNT_ID")
            .env_remove("CLOUDFLARE_API_TOKEN")
            .env_remove("CLOUDFLARE_PROJECT_NAME")
            .env_remove("RUST_LOG");
        cmd
    }

    #[allow(dead_code)]
    pub fn write_sync(&self, account_id: &str, api_token: &str, project_name: &str) {
        let settings = SyncSettings::new(account_id, api_token, project_name).unwrap();
        self.store().save_sync(&settings).unwrap();
    }

    /// 公開ツール・生成ツールを `sh -c <script>` に差し替える
    #[allow(dead_code)]
    pub fn write_tools(&self, publisher_script: &str, generator_script: &str) {
        let settings = ToolSettings {
            publisher_program: "sh".to_string(),
            publisher_args: vec![
                "-c".to_string(),
                publisher_script.to_string(),
                "wrangler".to_string(),
            ],
            generator_program: "sh".to_string(),
            generator_args: vec![
                "-c".to_string(),
                generator_script.to_string(),
                "drush".to_string(),
                "{base_url}".to_string(),
            ],
            ..ToolSettings::default()
        };
        self.store().save_tools(&settings).unwrap();
    }

    #[allow(dead_code)]
    pub fn state_json(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.config_dir().join("state.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[allow(dead_code)]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.root.path().join(relative).exists()
    }
}
