//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod add;
pub mod config;
pub mod count;
pub mod posts;
pub mod serve;
pub mod tree;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ct_core::comment::CommentValidator;
use ct_core::config::{Config, DEFAULT_CONFIG_PATH};
use ct_core::store::CommentStore;
use ct_core::thread::ThreadService;
use ct_core::types::PostId;
use ct_storage::FileSystemStore;

/// comment-thread - threaded comments for posts
#[derive(Debug, Parser)]
#[command(name = "comment-thread")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COMMENT_THREAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a post's comment tree as JSON
    Tree(tree::TreeArgs),

    /// Print the number of displayed comments of a post
    Count(count::CountArgs),

    /// Add a comment to a post
    Add(add::AddArgs),

    /// List posts with their comment counts
    Posts(posts::PostsArgs),

    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let load = || AppContext::load(&config_path, cli.data_dir.clone());

    match cli.command {
        Commands::Tree(args) => tree::execute(args, &load()?),
        Commands::Count(args) => count::execute(args, &load()?),
        Commands::Add(args) => add::execute(args, &load()?),
        Commands::Posts(args) => posts::execute(args, &load()?),
        Commands::Serve(args) => serve::execute(args, load()?),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

/// Loaded configuration and the service over the configured store
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn CommentStore>,
    pub service: ThreadService,
}

impl AppContext {
    /// Load config and open the file system store
    pub fn load(config_path: &Path, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        if let Some(dir) = data_dir {
            config.storage.data_dir = dir;
        }

        let store: Arc<dyn CommentStore> = Arc::new(
            FileSystemStore::new(&config.storage.data_dir).with_context(|| {
                format!(
                    "Failed to open data directory {}",
                    config.storage.data_dir.display()
                )
            })?,
        );

        let service = ThreadService::with_store(Arc::clone(&store))
            .with_validator(CommentValidator::from_config(&config.thread));

        Ok(Self {
            config,
            store,
            service,
        })
    }
}

/// Parse a post id argument
pub fn parse_post(post: &str) -> Result<PostId> {
    PostId::from_string(post).with_context(|| format!("Invalid post ID: {}", post))
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_parse_post() {
        assert!(parse_post("post-1").is_ok());
        assert!(parse_post("../x").is_err());
    }

    #[test]
    fn test_context_data_dir_override() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");

        let ctx = AppContext::load(&temp.path().join("missing.toml"), Some(data_dir.clone()))
            .unwrap();

        assert_eq!(ctx.config.storage.data_dir, data_dir);
        assert!(data_dir.join("threads").exists());
        assert!(ctx.store.list_posts().unwrap().is_empty());
    }
}
