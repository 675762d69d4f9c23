//! @dose
//! purpose: The plan command: loads aidex.toml, runs the pipeline and prints the resulting
//!     commands (or the whole Context as JSON) to stdout.
//!
//! invariants:
//!     - plan never executes anything and never writes files

use crate::cli::{PlanArgs, RequestOptions};
use crate::config::Config;
use crate::formatter::{format_plan, format_plan_json};
use crate::pipeline::{Environment, Pipeline};
use crate::types::Context;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Load config for `root` and run the standard pipeline for a request
pub fn build_context(request: &RequestOptions, root: &Path) -> Context {
    let config = Config::load(root);
    let env = Environment::from_config(root, &config, &request.exclude);

    if request.context().language().is_none() {
        tracing::warn!(language = %request.language, "unsupported language, nothing to do");
    }

    Pipeline::standard().run(request.context(), &env)
}

pub fn run_plan(args: &PlanArgs, root: &Path, verbose: bool) -> Result<()> {
    let ctx = build_context(&args.request, root);

    if verbose {
        println!(
            "Found {} project files, {} primary files",
            ctx.project_files.len(),
            ctx.primary_files.len()
        );
    }

    if args.json {
        let json = format_plan_json(&ctx).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        print!("{}", format_plan(&ctx));
    }

    Ok(())
}
