mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wishlink-cli")]
#[command(about = "Extract wishlist metadata from product links")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch title, image, price and site name for a product link
    Fetch {
        url: String,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Show how a link would be routed, without any network access
    Inspect { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = wishlink_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Fetch { url, compact }) => {
            commands::run_fetch(&config, &url, compact).await?;
        }
        Some(Commands::Inspect { url }) => commands::run_inspect(&config, &url)?,
        None => println!("wishlink-cli: pass `fetch <URL>` or `inspect <URL>` (see --help)"),
    }

    Ok(())
}
