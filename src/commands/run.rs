//! @dose
//! purpose: The run command: builds the plan, then hands each command to the shell executor
//!     one at a time, relaying captured output.
//!
//! when-editing:
//!     - !Commands run sequentially in primary-file order
//!     - A failing command does not stop the remaining ones
//!
//! invariants:
//!     - Exits with an error when any command fails to spawn or exits non-zero

use crate::cli::RunArgs;
use crate::commands::plan::build_context;
use crate::executor::{CommandExecutor, ShellExecutor};
use anyhow::Result;
use std::path::Path;

pub fn run_run(args: &RunArgs, root: &Path, verbose: bool) -> Result<()> {
    run_with_executor(args, root, verbose, &ShellExecutor::new())
}

pub fn run_with_executor(
    args: &RunArgs,
    root: &Path,
    verbose: bool,
    executor: &dyn CommandExecutor,
) -> Result<()> {
    let ctx = build_context(&args.request, root);

    if ctx.commands.is_empty() {
        println!("No primary files matched");
        return Ok(());
    }

    let mut succeeded = 0;
    let mut failed = 0;

    for (primary, command) in &ctx.commands {
        if args.dry_run {
            println!("{}", command);
            continue;
        }

        if verbose {
            println!("Running {}", command);
        }

        match executor.execute(command, root) {
            Ok(output) => {
                print!("{}", output.stdout);
                eprint!("{}", output.stderr);
                if output.success() {
                    succeeded += 1;
                } else {
                    eprintln!(
                        "Command for {} exited with {}",
                        primary,
                        output
                            .exit_code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "signal".to_string())
                    );
                    failed += 1;
                }
            }
            Err(e) => {
                eprintln!("Error running command for {}: {}", primary, e);
                failed += 1;
            }
        }
    }

    if args.dry_run {
        return Ok(());
    }

    println!("Succeeded: {}, Failed: {}", succeeded, failed);

    if failed > 0 {
        anyhow::bail!("{} commands failed", failed);
    }

    Ok(())
}
