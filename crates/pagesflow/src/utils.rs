use colored::Colorize;
use pagesflow_config::{SyncSettings, ToolSettings};
use pagesflow_core::{DeployConfig, PublishTool};
use std::path::{Path, PathBuf};

/// 保存済み設定からデプロイ設定を組み立てる
///
/// 未入力の項目は空文字のまま渡し、検証は Deployer に任せる
pub fn deploy_config(sync: &SyncSettings, content_path: PathBuf) -> DeployConfig {
    DeployConfig::new(
        sync.cloudflare_account_id.clone().unwrap_or_default(),
        sync.cloudflare_api_token.clone().unwrap_or_default(),
        sync.cloudflare_project_name.clone().unwrap_or_default(),
        content_path,
    )
}

pub fn publish_tool(tools: &ToolSettings) -> PublishTool {
    PublishTool::new(&tools.publisher_program, tools.publisher_args.clone())
}

/// アップロード対象ディレクトリ（相対パスは作業ディレクトリ基準）
pub fn static_content_path(tools: &ToolSettings) -> anyhow::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    Ok(tools.static_content_path(&current_dir))
}

/// 未入力の設定項目を案内付きで表示
pub fn print_missing_settings(missing: &[&str]) {
    eprintln!("{}", "Cloudflare連携設定が不足しています:".yellow());
    for key in missing {
        eprintln!("  • {}", key.cyan());
    }
    eprintln!();
    eprintln!(
        "{}",
        "ヒント: pagesflow config set --account-id <ID> --project-name <NAME> で設定してください"
            .yellow()
    );
    eprintln!("        APIトークンは CLOUDFLARE_API_TOKEN 環境変数での指定を推奨します");
}

pub fn display_path(path: &Path) -> String {
    path.display().to_string().cyan().to_string()
}
