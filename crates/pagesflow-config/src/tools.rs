//! 外部ツール設定 (pagesflow.settings)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 静的コンテンツの既定ディレクトリ（作業ディレクトリからの相対パス）
pub const DEFAULT_STATIC_CONTENT_DIR: &str = "html";

pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// デプロイに使うプログラム
    pub publisher_program: String,
    /// `pages deploy` の前に付ける引数
    pub publisher_args: Vec<String>,
    /// 静的サイト生成に使うプログラム
    pub generator_program: String,
    /// `{base_url}` はクロール対象URLに置換される
    pub generator_args: Vec<String>,
    pub base_url: String,
    /// 0 でタイムアウトなし
    pub deploy_timeout_secs: u64,
    /// 0 でタイムアウトなし
    pub generate_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_content_path: Option<PathBuf>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            publisher_program: "npx".to_string(),
            publisher_args: vec!["wrangler".to_string()],
            generator_program: "drush".to_string(),
            generator_args: vec![
                "tome:static".to_string(),
                "--uri={base_url}".to_string(),
                "--yes".to_string(),
            ],
            base_url: DEFAULT_BASE_URL.to_string(),
            deploy_timeout_secs: 900,
            generate_timeout_secs: 0,
            static_content_path: None,
        }
    }
}

impl ToolSettings {
    pub fn deploy_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.deploy_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.generate_timeout_secs)
    }

    /// アップロード対象ディレクトリを決定
    ///
    /// 相対パスは `base_dir` 基準で解決する
    pub fn static_content_path(&self, base_dir: &Path) -> PathBuf {
        match &self.static_content_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base_dir.join(path),
            None => base_dir.join(DEFAULT_STATIC_CONTENT_DIR),
        }
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
