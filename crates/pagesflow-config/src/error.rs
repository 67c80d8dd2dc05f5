use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error("必須項目が未入力です: {0}")]
    RequiredField(&'static str),

    #[error("設定ファイルを読み込めません ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("状態ファイルのバージョン {found} はサポート外です (対応: {supported})")]
    UnsupportedStateVersion { found: u32, supported: u32 },

    #[error("別の生成またはデプロイが実行中です ({holder}, {since} から)。完了してから再実行してください")]
    DeployLocked { holder: String, since: String },

    #[error("YAML エラー: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
