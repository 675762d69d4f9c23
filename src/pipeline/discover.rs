//! @dose
//! purpose: File discovery: every source file of the context's language under the project
//!     root, minus excluded paths, as sorted project-relative paths.
//!
//! when-editing:
//!     - !Excluded directories are pruned during the walk, not filtered afterwards
//!     - Only the language decides whether discovery runs; the task plays no part
//!
//! invariants:
//!     - Symlinks are followed only while their targets stay inside the root
//!     - Unreadable entries are skipped, never fatal

use super::{Environment, Stage};
use crate::dependency::normalize_separators;
use crate::exclusion::is_default_excluded;
use crate::types::{Context, Language, ProjectFile};
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub struct Discover;

impl Stage for Discover {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn apply(&self, ctx: Context, env: &Environment) -> Context {
        let Some(language) = ctx.language() else {
            tracing::debug!(language = %ctx.language, "unsupported language, skipping discovery");
            return ctx;
        };

        Context {
            project_files: discover_files(&env.root, language, env),
            ..ctx
        }
    }
}

/// Walk `root` and collect files with one of the language's extensions.
pub fn discover_files(root: &Path, language: Language, env: &Environment) -> BTreeSet<ProjectFile> {
    let extensions = language.extensions();
    let root_canon = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            !is_excluded_dir(e, root) && is_allowed_symlink_target(e, &root_canon)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .filter_map(|entry| relative_path(entry.path(), root))
        .filter(|relative| !env.exclusions.is_excluded(relative))
        .collect()
}

fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(normalize_separators(&relative.to_string_lossy()))
}

/// Directories under a default excluded prefix are not descended into
fn is_excluded_dir(entry: &DirEntry, root: &Path) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    match relative_path(entry.path(), root) {
        Some(relative) if !relative.is_empty() => is_default_excluded(&format!("{}/", relative)),
        _ => false,
    }
}

fn is_allowed_symlink_target(entry: &DirEntry, root_canon: &Path) -> bool {
    if !entry.path_is_symlink() {
        return true;
    }
    match entry.path().canonicalize() {
        Ok(real) => real.starts_with(root_canon),
        Err(_) => false,
    }
}
