use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// henrik-os - Mac development environment setup
#[derive(Parser, Debug)]
#[command(name = "henrik-os")]
#[command(about = "Set up a Mac development environment from a catalog of modules")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: print mutating commands and file writes instead of
    /// performing them.
    ///
    /// Read-only probes (is brew installed? which extensions exist?) still
    /// execute so the preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file (default: ~/.config/henrik-os/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Install modules (interactive picker when no modules are given)
    #[command(after_help = "Examples:
  henrik-os install                # Interactive TUI
  henrik-os install --all          # Everything, headless
  henrik-os install fish git       # Specific modules (dependencies added)
  henrik-os install claude-config  # Just sync Claude Code config")]
    Install {
        /// Module ids to install; dependencies are added automatically
        #[arg(value_name = "MODULE")]
        modules: Vec<String>,

        /// Install every registered module without prompting
        #[arg(long, conflicts_with = "modules")]
        all: bool,

        /// Write the run outcome as JSON (headless runs only)
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
    /// List available modules in install order
    List,
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Generate shell completion scripts
    Completion {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,

        /// Install into the shell's completion directory instead of printing
        #[arg(long)]
        install: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// How an `install` invocation should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMode {
    Interactive,
    All,
    Selected(Vec<String>),
}

impl InstallMode {
    pub fn from_args(modules: &[String], all: bool) -> Self {
        if all {
            Self::All
        } else if modules.is_empty() {
            Self::Interactive
        } else {
            Self::Selected(modules.to_vec())
        }
    }
}
