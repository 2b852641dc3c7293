//! Defines the command-line arguments and subcommands for the arkparse CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "arkparse",
    version,
    about = "Parse Ark scripts and inspect their syntax trees."
)]
pub struct ArkArgs {
    /// Increase log verbosity (-v for debug, -vv for trace). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the syntax tree of a script.
    Ast {
        /// The path to the Ark script file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// How to render the tree.
        #[arg(long, value_enum, default_value_t = AstFormat::Forms)]
        format: AstFormat,
        /// Also log the finished tree at debug level.
        #[arg(long)]
        debug: bool,
    },
    /// Parse every script under a path and report the number of top-level forms.
    Check {
        /// A script file, or a directory searched recursively for `.ark` files.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AstFormat {
    /// One s-expression per top-level form.
    Forms,
    /// Indented tree, one node per line.
    Tree,
    /// JSON, one document for the whole program.
    Json,
}
