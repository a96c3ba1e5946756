//! CLI module for symnav
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod location;
pub mod output;
pub mod response;

pub use location::{ParsedLocation, absolute_file, parse_line_col};
pub use output::OutputContext;

use clap::{Parser, Subcommand};

use commands::{
    block::BlockArgs, config::ConfigArgs, jump::JumpArgs, session::SessionArgs,
    targets::TargetsArgs,
};

const LONG_ABOUT: &str = r#"
symnav - structural code navigation

Answers "which function or class is the cursor in" and "where is the next or
previous definition" from a document's symbol tree. Symbols come from a saved
textDocument/documentSymbol response (a sidecar file next to the source, or
--symbols PATH). Python files without symbols fall back to a line scan.

EXAMPLES:
  symnav block src/app.py:12:5                 # innermost function/method
  symnav block src/app.py:12 --class --speak   # enclosing class, spoken
  symnav targets src/app.py                    # every jump target in order
  symnav jump next src/app.py:12:5
  echo '{"command":"next"}' | symnav session src/app.py --at 1:1

Lines and columns are 1-indexed.
"#;

/// symnav - structural code navigation
#[derive(Parser, Debug)]
#[command(name = "symnav")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'symnav <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the function or class enclosing a position
    Block(BlockArgs),

    /// List jump targets in document order
    Targets(TargetsArgs),

    /// Move to the next or previous definition
    Jump(JumpArgs),

    /// Apply navigation steps read from stdin against one cursor
    Session(SessionArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::navigator::Direction;

    #[test]
    fn test_parse_jump() {
        let cli = Cli::try_parse_from(["symnav", "jump", "prev", "src/a.py:3:1"]).unwrap();
        match cli.command {
            Commands::Jump(args) => {
                assert_eq!(args.direction, Direction::Previous);
                assert_eq!(args.location, "src/a.py:3:1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_block_flags() {
        let cli = Cli::try_parse_from([
            "symnav", "block", "a.py:3", "--class", "--symbols", "a.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Block(args) => {
                assert!(args.class);
                assert!(!args.speak);
                assert_eq!(args.symbols.as_deref(), Some(std::path::Path::new("a.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_direction_rejected() {
        assert!(Cli::try_parse_from(["symnav", "jump", "up", "a.py:1"]).is_err());
    }
}
