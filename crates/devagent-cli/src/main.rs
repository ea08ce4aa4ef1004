//! DevAgent - local interaction history and project tree tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use devagent_cli::{commands, config::Config, logging, state::AppState};
use devagent_types::Category;
use std::path::PathBuf;

use logging::{LogConfig, LogFormat};

/// DevAgent - inspect and manage the local agent interaction history.
#[derive(Parser, Debug)]
#[command(name = "devagent")]
#[command(about = "Local interaction history and project tree tool")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override database path from config
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable trace logging
    #[arg(long, global = true)]
    trace: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "log=debug").
    /// Targets are prefixed with "devagent::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL", global = true)]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record an interaction
    Add {
        #[arg(short = 't', long)]
        category: Category,
        #[arg(short, long)]
        input: String,
        #[arg(short, long)]
        output: String,
        /// Extra metadata, repeatable
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,
    },
    /// List interactions, newest first
    List {
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(short = 't', long)]
        category: Option<Category>,
        #[arg(long)]
        json: bool,
    },
    /// Show per-category usage counts
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Chat transcript commands
    Chat {
        #[command(subcommand)]
        action: ChatAction,
    },
    /// Remove every record of one category
    Remove {
        #[arg(short = 't', long)]
        category: Category,
    },
    /// Delete the whole history
    Clear,
    /// Export the history as JSON
    Export {
        /// Output file (stdout if omitted)
        file: Option<PathBuf>,
    },
    /// Replace the history with a previous export
    Import { file: PathBuf },
    /// Print the file tree of a project directory
    Tree {
        dir: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print one file of a project directory by its tree path
    Cat { dir: PathBuf, path: String },
}

#[derive(Subcommand, Debug)]
enum ChatAction {
    /// Print the transcript rebuilt from the history
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Remove chat records, leaving other history intact
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut stdout = std::io::stdout().lock();

    // Tree commands never touch the store
    match &cli.command {
        Command::Tree { dir, json } => return commands::tree(dir, *json, &mut stdout).await,
        Command::Cat { dir, path } => return commands::cat(dir, path, &mut stdout).await,
        _ => {}
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    tracing::info!(target: "devagent::startup", "Using database {}", config.db_path.display());

    let state = AppState::new(config)?;
    let log = &state.log;

    match cli.command {
        Command::Add {
            category,
            input,
            output,
            metadata,
        } => commands::add(log, category, &input, &output, &metadata, &mut stdout),
        Command::List {
            limit,
            category,
            json,
        } => commands::list(log, limit, category, json, &mut stdout),
        Command::Stats { json } => commands::show_stats(log, json, &mut stdout),
        Command::Chat { action } => match action {
            ChatAction::Show { json } => commands::chat_show(log, json, &mut stdout),
            ChatAction::Clear => commands::remove(log, Category::Chat, &mut stdout),
        },
        Command::Remove { category } => commands::remove(log, category, &mut stdout),
        Command::Clear => commands::clear(log, &mut stdout),
        Command::Export { file } => commands::export(log, file.as_deref(), &mut stdout),
        Command::Import { file } => commands::import(log, &file, &mut stdout),
        Command::Tree { .. } | Command::Cat { .. } => Ok(()),
    }
}
