mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use notemind::config::NotemindConfig;

#[derive(Parser)]
#[command(name = "notemind", version, about = "Notes API with question answering over your notes")]
struct Cli {
    /// Config file (default: ~/.notemind/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve,
    /// Add a note
    Add { content: String },
    /// List all notes
    List {
        /// Print full content instead of one-line previews
        #[arg(long)]
        full: bool,
    },
    /// Replace the content of a note
    Edit { id: i64, content: String },
    /// Delete a note
    Delete { id: i64 },
    /// Ask a question answered from your notes
    Ask { query: String },
    /// Summarize all notes
    Summarize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NotemindConfig::load_from(path)?,
        None => NotemindConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => notemind::server::serve(config).await?,
        Command::Add { content } => cli::notes::add(&config, &content).await?,
        Command::List { full } => cli::notes::list(&config, full).await?,
        Command::Edit { id, content } => cli::notes::edit(&config, id, &content).await?,
        Command::Delete { id } => cli::notes::delete(&config, id).await?,
        Command::Ask { query } => cli::ask::ask(&config, &query).await?,
        Command::Summarize => cli::ask::summarize(&config).await?,
    }

    Ok(())
}
