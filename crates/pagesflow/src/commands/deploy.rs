use crate::message::TerminalSink;
use crate::utils;
use colored::Colorize;
use pagesflow_cloudflare::TokioRunner;
use pagesflow_config::{ConfigStore, DeployRecord, StateManager};
use pagesflow_core::{DeployError, DeployOutcome, Deployer};
use std::path::Path;
use std::sync::Arc;

pub async fn handle(config_dir: &Path) -> anyhow::Result<DeployOutcome> {
    let store = ConfigStore::new(config_dir);
    let sync = store.load_sync()?.with_env_overrides();
    let tools = store.load_tools()?;

    // 1. 設定の確認（プロセス起動前に失敗させる）
    let missing = sync.missing();
    if !missing.is_empty() {
        utils::print_missing_settings(&missing);
        return Err(anyhow::anyhow!(
            "必須設定が未入力です: {}",
            missing.join(", ")
        ));
    }

    // 同じ設定スコープでの生成・デプロイは同時に1つまで
    let state_manager = StateManager::new(config_dir);
    let lock = state_manager.acquire_lock().await?;

    // 2. 静的サイトが生成済みか（ロック取得後に読む）
    let state = state_manager.load().await?;
    if !state.generation_completed {
        return Err(anyhow::anyhow!(
            "静的サイトがまだ生成されていません。先に `pagesflow generate` を実行してください"
        ));
    }

    // 3. アップロード対象ディレクトリ
    let content_path = utils::static_content_path(&tools)?;
    if !content_path.is_dir() {
        return Err(anyhow::anyhow!(
            "静的コンテンツのディレクトリが見つかりません: {}",
            content_path.display()
        ));
    }

    let config = utils::deploy_config(&sync, content_path);

    println!("{}", "デプロイを開始します...".blue().bold());
    println!("プロジェクト: {}", config.project_name.cyan());
    println!("対象: {}", utils::display_path(&config.content_path));

    let deployer = Deployer::new(TokioRunner, utils::publish_tool(&tools), Arc::new(TerminalSink))
        .with_timeout(tools.deploy_timeout());

    let outcome = match deployer.deploy(&config).await {
        Ok(outcome) => outcome,
        Err(DeployError::MissingSetting(setting)) => {
            lock.release().await?;
            return Err(anyhow::anyhow!("必須設定が未入力です: {}", setting));
        }
    };
    tracing::debug!("Publisher output:\n{}", outcome.raw_output);

    // デプロイ中に書き換えられていても上書きしないよう読み直す
    let mut state = state_manager.load().await?;
    state.record_deploy(DeployRecord::now(
        &config.project_name,
        outcome.success,
        outcome.exit_code,
        outcome.kind,
    ));
    state_manager.save(&state).await?;
    lock.release().await?;

    Ok(outcome)
}
