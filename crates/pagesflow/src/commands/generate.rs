use colored::Colorize;
use pagesflow_cloudflare::TokioRunner;
use pagesflow_config::{ConfigStore, StateManager};
use pagesflow_core::{CommandGenerator, StaticGenerator};
use std::path::Path;

pub async fn handle(config_dir: &Path, base_url: Option<String>) -> anyhow::Result<()> {
    let tools = ConfigStore::new(config_dir).load_tools()?;
    let base_url = base_url.unwrap_or_else(|| tools.base_url.clone());

    println!("{}", "静的HTMLの生成を開始します...".blue().bold());
    println!("ベースURL: {}", base_url.cyan());

    let generator = CommandGenerator::new(
        TokioRunner,
        &tools.generator_program,
        tools.generator_args.clone(),
    )
    .with_timeout(tools.generate_timeout());

    // デプロイ中に生成物を書き換えない
    let state_manager = StateManager::new(config_dir);
    let lock = state_manager.acquire_lock().await?;

    let result = generator.generate(&base_url).await;
    let mut state = state_manager.load().await?;

    match result {
        Ok(report) => {
            tracing::debug!("Generator output:\n{}", report.output);
            state.mark_generated(&report.base_url);
            state_manager.save(&state).await?;
            lock.release().await?;

            println!("{}", "✓ 静的HTMLの生成が完了しました".green().bold());
            println!("  次のコマンドでデプロイできます: {}", "pagesflow deploy".cyan());
            Ok(())
        }
        Err(e) => {
            // 失敗した生成物はデプロイさせない
            state.clear_generated();
            state_manager.save(&state).await?;
            lock.release().await?;
            Err(anyhow::anyhow!("静的HTMLの生成に失敗しました: {}", e))
        }
    }
}
