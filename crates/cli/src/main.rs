use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rentswipe")]
#[command(about = "Judge rental listings and inspect the swipe queue", long_about = None)]
struct Cli {
    /// User whose judgments are read and written
    #[arg(short, long, global = true, env = "RENTSWIPE_USER_ID")]
    user: Option<String>,

    /// Keep likes in process memory instead of calling RENTSWIPE_API_URL
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the listings still waiting for a judgment
    Queue {
        /// JSON catalog: an array of listings or {"listings": [...]}
        #[arg(short, long)]
        catalog: PathBuf,
    },
    /// Approve a listing
    Like { id: String },
    /// Reject a listing
    Dislike { id: String },
    /// Forget local dislikes and rebuild from the server
    Reset,
    /// Print the liked listings of a catalog
    Liked {
        #[arg(short, long)]
        catalog: PathBuf,
    },
    /// Print the locally stored dislikes
    Dislikes,
    /// Re-send remote operations that failed earlier
    Retry,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let target = commands::Target { user: cli.user, offline: cli.offline };

    match cli.command {
        Commands::Queue { catalog } => commands::listings::run_queue(&target, &catalog).await?,
        Commands::Like { id } => commands::judge::run_like(&target, &id).await?,
        Commands::Dislike { id } => commands::judge::run_dislike(&target, &id).await?,
        Commands::Reset => commands::judge::run_reset(&target).await?,
        Commands::Liked { catalog } => commands::listings::run_liked(&target, &catalog).await?,
        Commands::Dislikes => commands::listings::run_dislikes(&target).await?,
        Commands::Retry => commands::judge::run_retry(&target).await?,
    }

    Ok(())
}
