//! @dose
//! purpose: Final stage. Turns the accumulated file sets and prompts into one command string
//!     per primary file.
//!
//! when-editing:
//!     - !Command layout lives in formatter::command; this stage only gathers the inputs
//!
//! invariants:
//!     - commands has exactly one key per primary file
//!     - Previous commands are replaced, not merged

use super::{Environment, Stage};
use crate::formatter::{render_command, CommandSpec};
use crate::types::Context;

/// Renders one command per primary file from the accumulated file sets
pub struct Render;

impl Stage for Render {
    fn name(&self) -> &'static str {
        "render"
    }

    fn apply(&self, ctx: Context, env: &Environment) -> Context {
        let commands = ctx
            .primary_files
            .iter()
            .map(|primary| {
                let command = render_command(&CommandSpec {
                    invocation: &env.invocation,
                    global_readonly: &ctx.global_readonly_files,
                    readonly: ctx.readonly_files.get(primary),
                    primary,
                    positive_prompt: ctx.positive_prompt.as_deref(),
                    negative_prompt: ctx.negative_prompt.as_deref(),
                });
                (primary.clone(), command)
            })
            .collect();

        Context { commands, ..ctx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_one_command_per_primary() {
        let env = Environment::new("/nonexistent");
        let mut ctx = Context::new("elixir", "Refactor code")
            .with_prompts(Some("A".to_string()), Some(String::new()));
        ctx.primary_files.insert("lib/a.ex".to_string());
        ctx.primary_files.insert("lib/b.ex".to_string());
        ctx.readonly_files.insert(
            "lib/a.ex".to_string(),
            BTreeSet::from(["lib/b.ex".to_string()]),
        );

        let ctx = Render.apply(ctx, &env);
        assert_eq!(ctx.commands.len(), 2);
        assert_eq!(
            ctx.commands["lib/a.ex"],
            "aider --read lib/b.ex --file lib/a.ex --message \"Positive prompt: A\""
        );
        assert_eq!(
            ctx.commands["lib/b.ex"],
            "aider --file lib/b.ex --message \"Positive prompt: A\""
        );
    }

    #[test]
    fn test_no_prompts_no_message() {
        let env = Environment::new("/nonexistent");
        let mut ctx = Context::new("elixir", "Refactor code");
        ctx.primary_files.insert("lib/a.ex".to_string());

        let ctx = Render.apply(ctx, &env);
        assert!(!ctx.commands["lib/a.ex"].contains("--message"));
    }
}
