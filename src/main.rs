//! @dose
//! purpose: This is the CLI entry point for aidex. It parses command-line arguments using
//!     clap, sets up logging, determines the project root directory, and dispatches to the
//!     plan or run command handler.
//!
//! when-editing:
//!     - !The root directory defaults to current working directory if not specified
//!     - Error messages are printed to stderr and exit with code 1
//!
//! do-not:
//!     - Never add business logic here - delegate to command modules

use aidex::cli::{Cli, Commands};
use aidex::commands::{run_plan, run_run};
use aidex::logging::init_logging;
use anyhow::Context;
use clap::Parser;
use std::env;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Determine root directory
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Plan(args) => run_plan(&args, &root, cli.verbose),
        Commands::Run(args) => run_run(&args, &root, cli.verbose),
    }
}
