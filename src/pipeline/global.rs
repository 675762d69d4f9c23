//! @dose
//! purpose: Attaches the workflow's baseline files (guidelines, test helpers) to every
//!     command through global_readonly_files.
//!
//! when-editing:
//!     - !Baselines come from Environment; overrides from aidex.toml are already applied there
//!
//! invariants:
//!     - Existing global entries are kept; the baseline is unioned in
//!     - Applying the stage twice gives the same result as applying it once
//!
//! gotchas:
//!     - An unknown task still has a workflow (the generic one) and gets its baseline

use super::{Environment, Stage};
use crate::types::Context;

/// Paths are taken as configured, without checking the filesystem.
pub struct GlobalReadonly;

impl Stage for GlobalReadonly {
    fn name(&self) -> &'static str {
        "global-readonly"
    }

    fn apply(&self, ctx: Context, env: &Environment) -> Context {
        let Some(workflow) = ctx.workflow() else {
            return ctx;
        };

        let mut global_readonly_files = ctx.global_readonly_files.clone();
        global_readonly_files.extend(env.baselines.get(workflow));

        Context {
            global_readonly_files,
            ..ctx
        }
    }
}
