//! @dose
//! purpose: Primary file selection. Narrows project_files to the files that will be edited.
//!
//! invariants:
//!     - primary_files is always a subset of project_files

use super::{Environment, Stage};
use crate::types::{Context, ProjectFile};
use std::collections::BTreeSet;

/// Narrows project files to the primary (edit) targets
pub struct SelectPrimary;

impl Stage for SelectPrimary {
    fn name(&self) -> &'static str {
        "select"
    }

    fn apply(&self, ctx: Context, _env: &Environment) -> Context {
        Context {
            primary_files: select_primary(&ctx.project_files, ctx.filter.as_deref()),
            ..ctx
        }
    }
}

/// Literal, case-sensitive substring match; no filter or an empty one selects everything.
pub fn select_primary(
    project_files: &BTreeSet<ProjectFile>,
    filter: Option<&str>,
) -> BTreeSet<ProjectFile> {
    match filter {
        Some(f) if !f.is_empty() => project_files
            .iter()
            .filter(|path| path.contains(f))
            .cloned()
            .collect(),
        _ => project_files.clone(),
    }
}
