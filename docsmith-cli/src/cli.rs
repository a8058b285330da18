use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docsmith",
    version,
    about = "Google Docs agent backed by Arcade tools, with approval for edits"
)]
pub struct Cli {
    /// Agent configuration file (defaults to config/agent.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, short, value_enum, default_value_t = RunMode::Runner)]
    pub mode: RunMode,
    /// Toolkit to load; repeat to load several. Replaces the configured list.
    #[arg(long = "toolkit")]
    pub toolkits: Vec<String>,
    /// Overrides OPENAI_MODEL
    #[arg(long)]
    pub model: Option<String>,
    /// Overrides ARCADE_USER_ID
    #[arg(long)]
    pub user_id: Option<String>,
    /// Authorize tools on first use instead of at startup
    #[arg(long)]
    pub no_preauthorize: bool,
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Conversation kept as a message list; a refused tool call ends the turn
    Runner,
    /// Conversation kept in an in-memory session; events print as they arrive
    Session,
}
