mod boxes;
mod replay;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "boxsync-cli")]
#[command(about = "Edition → box dropdown synchronizer tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one edition's boxes and print the resulting dropdown options
    Boxes {
        /// Edition identifier; an empty string prints the placeholder only
        edition: String,
    },
    /// Fire one change per edition in quick succession and print the final dropdown
    Replay {
        /// Editions in the order they are selected
        #[arg(required = true)]
        editions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = boxsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Boxes { edition } => boxes::run_boxes(&config, &edition).await,
        Commands::Replay { editions } => replay::run_replay(&config, &editions).await,
    }
}
