use crate::utils;
use colored::Colorize;
use pagesflow_cloudflare::{CloudflareError, PagesApi, TokioRunner, Wrangler};
use pagesflow_config::ConfigStore;
use std::path::Path;

/// 全項目が通れば true
pub async fn handle(config_dir: &Path) -> anyhow::Result<bool> {
    let store = ConfigStore::new(config_dir);
    let sync = store.load_sync()?.with_env_overrides();
    let tools = store.load_tools()?;

    let mut ok = true;

    // 1. 公開ツール
    let wrangler = Wrangler::new(utils::publish_tool(&tools), TokioRunner);
    match wrangler.version().await {
        Ok(version) => println!("  ✓ wrangler {}", version.cyan()),
        Err(CloudflareError::WranglerNotFound(e)) => {
            ok = false;
            println!("  ✗ wrangler を起動できません: {}", e);
            println!("    {}", "npm install -g wrangler でインストールしてください".yellow());
        }
        Err(e) => {
            ok = false;
            println!("  ✗ wrangler: {}", e);
        }
    }

    // 2. Cloudflare API
    let missing = sync.missing();
    if !missing.is_empty() {
        println!("  ✗ Cloudflare連携設定 (未入力: {})", missing.join(", "));
        return Ok(false);
    }

    let (Some(account_id), Some(api_token), Some(project_name)) = (
        sync.cloudflare_account_id.as_deref(),
        sync.cloudflare_api_token.as_deref(),
        sync.cloudflare_project_name.as_deref(),
    ) else {
        return Ok(false);
    };

    let api = PagesApi::new(account_id, api_token);
    match api.verify_token().await {
        Ok(status) if status.is_active() => println!("  ✓ APIトークン有効"),
        Ok(status) => {
            ok = false;
            println!("  ✗ APIトークンの状態: {}", status.status.yellow());
        }
        Err(e) => {
            ok = false;
            println!("  ✗ APIトークンを確認できません: {}", e);
        }
    }

    match api.get_project(project_name).await {
        Ok(project) => {
            let domain = project.subdomain.unwrap_or_default();
            println!("  ✓ Pagesプロジェクト {} ({})", project.name.cyan(), domain);
        }
        Err(e) => {
            ok = false;
            println!("  ✗ {}", e);
        }
    }

    Ok(ok)
}
