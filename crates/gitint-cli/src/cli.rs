use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "gitint",
    about = "Inspect the loose objects, branches and history of a git repository",
    version,
)]
pub struct Cli {
    /// Command to run; without one, an interactive prompt starts
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Repository directory holding objects/, refs/ and HEAD
    #[arg(long, global = true)]
    pub git_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for command results
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List branches, marking the current one
    ListBranches,
    /// Print an object by hash
    CatFile { hash: String },
    /// Show history from a branch tip
    Log(LogArgs),
    /// List every file path in a commit's tree
    CommitTree { hash: String },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LogArgs {
    pub branch: String,
    /// Stop after this many commits
    #[arg(short = 'n', long)]
    pub max_count: Option<usize>,
}

impl Command {
    /// Name of the command as typed by the user.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListBranches => "list-branches",
            Self::CatFile { .. } => "cat-file",
            Self::Log(_) => "log",
            Self::CommitTree { .. } => "commit-tree",
        }
    }
}
