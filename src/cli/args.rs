//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert a tree of static HTML pages into a routed React application
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Source directory with the static pages (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Destination React project directory (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Config file path (default: reactify.toml)
    #[arg(short = 'C', long, global = true, default_value = "reactify.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default reactify.toml to the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the config template instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Convert every page and write the route table
    #[command(visible_alias = "b")]
    Build,

    /// Build, then rebuild on source changes
    #[command(visible_alias = "w")]
    Watch {
        /// Quiet period in milliseconds before changes are processed
        #[arg(long, value_name = "MS")]
        debounce: Option<u64>,
    },

    /// Convert a single page without touching the route table
    #[command(visible_alias = "c")]
    Convert {
        /// Page to convert (relative to cwd or the source directory)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Both roots given on the command line.
    pub const fn has_roots(&self) -> bool {
        self.source.is_some() && self.destination.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watch_with_debounce() {
        let cli = Cli::try_parse_from(["reactify", "watch", "--debounce", "50", "-s", "pages"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { debounce: Some(50) }));
        assert_eq!(cli.source, Some(PathBuf::from("pages")));
        assert!(!cli.has_roots());
    }

    #[test]
    fn test_parse_aliases() {
        let cli = Cli::try_parse_from(["reactify", "-s", "a", "-d", "b", "b"]).unwrap();
        assert!(matches!(cli.command, Commands::Build));
        assert!(cli.has_roots());
        assert_eq!(cli.config, PathBuf::from("reactify.toml"));

        let cli = Cli::try_parse_from(["reactify", "c", "about.html"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert { .. }));

        let cli = Cli::try_parse_from(["reactify", "init", "--dry"]).unwrap();
        assert!(cli.is_init());
    }
}
