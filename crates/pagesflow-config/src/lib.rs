pub mod error;
pub mod state;
pub mod store;
pub mod sync;
pub mod tools;

pub use error::*;
pub use state::{DeployLock, DeployRecord, SiteState, StateManager};
pub use store::ConfigStore;
pub use sync::SyncSettings;
pub use tools::ToolSettings;

use std::path::PathBuf;

/// 設定ディレクトリを上書きする環境変数
pub const CONFIG_DIR_ENV: &str = "PAGESFLOW_CONFIG_DIR";

/// pagesflowの設定ディレクトリを取得
///
/// 1. 環境変数 PAGESFLOW_CONFIG_DIR
/// 2. ~/.config/pagesflow (プラットフォームの設定ディレクトリ)
///
/// ディレクトリが存在しない場合は作成する
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = match std::env::var(CONFIG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()
            .ok_or(ConfigError::ConfigDirNotFound)?
            .join("pagesflow"),
    };

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}
