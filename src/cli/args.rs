//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Build Minify URIs from files, groups and a base directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: minify.toml, optional)
    #[arg(short = 'C', long, default_value = "minify.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip installation, base, group and file checks
    #[arg(long, global = true)]
    pub no_strict: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build a URI from command-line arguments
    #[command(visible_alias = "b")]
    Build {
        /// Base directory files are relative to
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        base: Option<String>,

        /// Group name (repeatable)
        #[arg(short, long = "group", value_name = "NAME")]
        groups: Vec<String>,

        /// File path (repeatable)
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<String>,
    },

    /// Encode a `{ base, groups, files }` JSON descriptor.
    /// Use `-` to read from stdin.
    #[command(visible_alias = "e")]
    Encode {
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Encode every key of a JSON manifest (`[{ "key": ..., "files": [...] }, ...]`).
    /// Use `-` to read from stdin.
    #[command(visible_alias = "m")]
    Manifest {
        #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from([
            "minify-uri", "build", "-b", "styles", "-f", "a.css", "--file", "b.css", "-g", "css",
        ]);
        match cli.command {
            Commands::Build {
                base,
                groups,
                files,
            } => {
                assert_eq!(base.as_deref(), Some("styles"));
                assert_eq!(groups, ["css"]);
                assert_eq!(files, ["a.css", "b.css"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.no_strict);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["minify-uri", "encode", "-", "--no-strict", "-v"]);
        assert!(cli.no_strict);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Encode { ref input } if input.as_os_str() == "-"));
    }
}
