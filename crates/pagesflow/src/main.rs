mod commands;
mod message;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagesflow")]
#[command(about = "静的サイトを生成して、Cloudflare Pagesへ公開する。", long_about = None)]
struct Cli {
    /// 設定ディレクトリ（既定: ~/.config/pagesflow）
    #[arg(long, global = true, env = "PAGESFLOW_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cloudflare連携設定を管理
    #[command(subcommand)]
    Config(ConfigCommands),
    /// 静的HTMLを生成
    Generate {
        /// クロール対象のベースURL（省略時は設定値）
        #[arg(long)]
        base_url: Option<String>,
    },
    /// 生成済みの静的サイトをCloudflare Pagesへデプロイ
    Deploy,
    /// 生成・デプロイの状態を表示
    Status,
    /// wrangler と Cloudflare API の疎通を確認
    Check,
    /// バージョン情報を表示
    Version,
}

/// Cloudflare連携設定のサブコマンド
#[derive(Subcommand)]
enum ConfigCommands {
    /// 設定を保存（3項目とも必須）
    Set {
        /// Cloudflare Account ID
        #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
        account_id: String,
        /// Cloudflare API Token（プロセス一覧に残さないよう環境変数での指定を推奨）
        #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
        api_token: String,
        /// Cloudflare Pages のプロジェクト名
        #[arg(long, env = "CLOUDFLARE_PROJECT_NAME")]
        project_name: String,
    },
    /// 現在の設定を表示（APIトークンはマスク）
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ（stdoutはユーザー向けメッセージ）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Versionコマンドは設定ディレクトリ不要
    if matches!(cli.command, Commands::Version) {
        println!("pagesflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config_dir = match cli.config_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => pagesflow_config::get_config_dir()?,
    };
    tracing::debug!("Config directory: {}", config_dir.display());

    match cli.command {
        Commands::Config(ConfigCommands::Set {
            account_id,
            api_token,
            project_name,
        }) => {
            commands::config::handle_set(&config_dir, account_id, api_token, project_name)?;
        }
        Commands::Config(ConfigCommands::Show) => {
            commands::config::handle_show(&config_dir)?;
        }
        Commands::Generate { base_url } => {
            commands::generate::handle(&config_dir, base_url).await?;
        }
        Commands::Deploy => {
            let outcome = commands::deploy::handle(&config_dir).await?;
            // デプロイ失敗は終了コードにも反映する
            if !outcome.success {
                std::process::exit(1);
            }
        }
        Commands::Status => {
            commands::status::handle(&config_dir).await?;
        }
        Commands::Check => {
            if !commands::check::handle(&config_dir).await? {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }

    Ok(())
}
