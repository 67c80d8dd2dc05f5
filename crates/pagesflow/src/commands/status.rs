use crate::utils;
use colored::Colorize;
use pagesflow_config::{ConfigStore, StateManager};
use std::path::Path;

pub async fn handle(config_dir: &Path) -> anyhow::Result<()> {
    let store = ConfigStore::new(config_dir);
    let sync = store.load_sync()?.with_env_overrides();
    let tools = store.load_tools()?;
    let state = StateManager::new(config_dir).load().await?;
    let content_path = utils::static_content_path(&tools)?;

    println!("📄 設定ディレクトリ: {}", utils::display_path(config_dir));
    println!("📁 静的コンテンツ: {}", utils::display_path(&content_path));
    println!();

    let missing = sync.missing();
    if missing.is_empty() {
        println!("  ✓ Cloudflare連携設定");
    } else {
        println!("  ✗ Cloudflare連携設定 (未入力: {})", missing.join(", ").yellow());
    }

    if state.generation_completed {
        let at = state
            .generated_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_default();
        println!(
            "  ✓ 静的HTML生成済み ({} {})",
            state.base_url.as_deref().unwrap_or("-"),
            at
        );
    } else {
        println!("  ✗ 静的HTML未生成");
    }

    match &state.last_deploy {
        Some(record) => {
            let result = if record.success {
                "成功".green()
            } else {
                format!("失敗: {} (exit {})", record.kind, record.exit_code).red()
            };
            println!(
                "  • 前回のデプロイ: {} {} [{}]",
                record.at.format("%Y-%m-%d %H:%M:%S UTC"),
                record.project_name.cyan(),
                result
            );
        }
        None => println!("  • 前回のデプロイ: なし"),
    }

    println!();
    if missing.is_empty() && state.generation_completed {
        println!("{}", "デプロイ可能です: pagesflow deploy".green().bold());
    } else if !state.generation_completed {
        println!(
            "{}",
            "デプロイするには先に pagesflow generate を実行してください".yellow()
        );
    } else {
        println!(
            "{}",
            "デプロイするには pagesflow config set で設定してください".yellow()
        );
    }
    Ok(())
}
