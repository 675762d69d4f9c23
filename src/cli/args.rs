//! @dose
//! purpose: This module defines the command-line interface for aidex using the clap derive
//!     macros. It specifies the plan and run commands and the request options they share.
//!
//! when-editing:
//!     - !Each command struct must derive Args and be added to the Commands enum
//!     - !Global flags (root, verbose) are defined on Cli and propagate to all subcommands
//!     - RequestOptions is flattened into every command that runs the pipeline
//!
//! invariants:
//!     - The Cli struct is the root parser that clap uses to parse command-line arguments
//!     - PathBuf is used for all file/directory path arguments
//!
//! gotchas:
//!     - --task is free text ("Generate tests", "refactor", ...); an unrecognised value is not
//!       a parse error, it runs the generic workflow
//!     - The --root flag is global but optional; defaults to current directory in main.rs

use crate::types::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_LANGUAGE: &str = "elixir";
pub const DEFAULT_TASK: &str = "Refactor code";

#[derive(Parser)]
#[command(name = "aidex")]
#[command(author, version, about = "Assemble aider commands with related Elixir files as context")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the files and aider commands for each primary file
    Plan(PlanArgs),

    /// Execute the aider command for each primary file
    Run(RunArgs),
}

/// What the pipeline should do, shared by all commands
#[derive(Args, Clone)]
pub struct RequestOptions {
    /// Source language
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Task, e.g. "Generate tests" or "Refactor code"
    #[arg(short, long, default_value = DEFAULT_TASK)]
    pub task: String,

    /// Only files whose path contains this text become primary files
    #[arg(short, long)]
    pub filter: Option<String>,

    /// What the edit should do
    #[arg(short, long)]
    pub positive: Option<String>,

    /// What the edit should avoid
    #[arg(short, long)]
    pub negative: Option<String>,

    /// Exclude files matching glob pattern (can be repeated)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            task: DEFAULT_TASK.to_string(),
            filter: None,
            positive: None,
            negative: None,
            exclude: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// Initial pipeline context for this request
    pub fn context(&self) -> Context {
        Context::new(&self.language, &self.task)
            .with_filter(self.filter.clone())
            .with_prompts(self.positive.clone(), self.negative.clone())
    }
}

#[derive(Args, Default)]
pub struct PlanArgs {
    /// Print the full context as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub request: RequestOptions,
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Print the commands instead of executing them
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub request: RequestOptions,
}
