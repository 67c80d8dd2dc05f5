use crate::utils;
use colored::Colorize;
use pagesflow_config::{ConfigStore, SyncSettings};
use std::path::Path;

pub fn handle_set(
    config_dir: &Path,
    account_id: String,
    api_token: String,
    project_name: String,
) -> anyhow::Result<()> {
    let settings = SyncSettings::new(account_id, api_token, project_name)?;

    let store = ConfigStore::new(config_dir);
    store.save_sync(&settings)?;

    println!("{}", "✓ 設定を保存しました".green());
    println!(
        "  {}",
        utils::display_path(&store.scope_path(pagesflow_config::store::SYNC_SCOPE))
    );
    Ok(())
}

pub fn handle_show(config_dir: &Path) -> anyhow::Result<()> {
    let store = ConfigStore::new(config_dir);
    let settings = store.load_sync()?.with_env_overrides();

    let unset = || "(未設定)".dimmed().to_string();

    println!("{}", "Cloudflare連携設定:".bold());
    println!(
        "  cloudflare_account_id:   {}",
        settings
            .cloudflare_account_id
            .clone()
            .unwrap_or_else(unset)
    );
    println!(
        "  cloudflare_api_token:    {}",
        settings.masked_api_token().unwrap_or_else(unset)
    );
    println!(
        "  cloudflare_project_name: {}",
        settings
            .cloudflare_project_name
            .clone()
            .unwrap_or_else(unset)
    );

    let missing = settings.missing();
    if !missing.is_empty() {
        println!();
        utils::print_missing_settings(&missing);
    }
    Ok(())
}
