//! CLI command definitions for the `companion` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod category;
pub mod companion;
pub mod form;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Author and edit AI companions.
#[derive(Parser)]
#[command(name = "companion", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the companion store (overrides config.toml).
    #[arg(long, global = true, env = "COMPANION_API_URL")]
    pub api_url: Option<String>,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new companion through the guided form.
    #[command(alias = "new")]
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing companion through the guided form.
    Edit {
        /// Id of the companion to edit.
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List the categories a companion can belong to.
    #[command(alias = "ls-categories")]
    Categories,

    /// Check a companion definition file (JSON or TOML) without saving it.
    Validate {
        /// Path to the definition file.
        file: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Field values supplied up front. Anything left out is prompted for.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Avatar image reference (uploaded asset id or URL).
    #[arg(long)]
    pub src: Option<String>,

    /// Display name.
    #[arg(long)]
    pub name: Option<String>,

    /// Short description.
    #[arg(long)]
    pub description: Option<String>,

    /// Category id or category name.
    #[arg(long)]
    pub category: Option<String>,

    /// File holding the behavioral instructions.
    #[arg(long, value_name = "FILE")]
    pub instructions_file: Option<PathBuf>,

    /// File holding the example conversation.
    #[arg(long, value_name = "FILE")]
    pub seed_file: Option<PathBuf>,

    /// Never prompt; submit with the values given.
    #[arg(long)]
    pub no_input: bool,
}
