//! Plan output for the CLI: a plain listing of commands, or the whole Context as JSON.

use crate::types::Context;

/// One block per primary file: the file, then its command indented below it
pub fn format_plan(ctx: &Context) -> String {
    let mut out = String::new();

    if !ctx.global_readonly_files.is_empty() {
        out.push_str("global readonly:\n");
        for path in &ctx.global_readonly_files {
            out.push_str(&format!("  {}\n", path));
        }
        out.push('\n');
    }

    for (primary, command) in &ctx.commands {
        out.push_str(&format!("{}\n  {}\n", primary, command));
    }

    out
}

pub fn format_plan_json(ctx: &Context) -> serde_json::Result<String> {
    serde_json::to_string_pretty(ctx)
}
