//! @dose
//! purpose: Builds the per-primary-file readonly sets. In refactor mode the primary file's own
//!     references are used; in generate-tests mode each test file is paired with its
//!     implementation file, which is attached together with that file's references.
//!
//! when-editing:
//!     - !Per-file work runs on rayon; the merge into readonly_files happens on one thread
//!     - !Existing entries are unioned, never replaced
//!
//! invariants:
//!     - A set never contains its own key
//!     - Only members of project_files are attached (the implementation file itself is the
//!       one exception: it only has to exist on disk)
//!     - Empty sets are removed, so readonly_files never maps to an empty set
//!     - Applying the stage twice gives the same result as applying it once
//!
//! gotchas:
//!     - Unreadable files count as having no references
//!     - Every task other than generate-tests uses refactor mode
//!     - In generate-tests mode, primary files that are not `test/..._test.exs` keep whatever
//!       entry they already had

use super::{Environment, Stage};
use crate::dependency::{implementation_path_for_test, namespace_to_path};
use crate::parser::ReferenceExtractor;
use crate::types::{Context, ProjectFile, Task};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub struct Readonly;

impl Stage for Readonly {
    fn name(&self) -> &'static str {
        "readonly"
    }

    fn apply(&self, ctx: Context, env: &Environment) -> Context {
        let Some(workflow) = ctx.workflow() else {
            return ctx;
        };
        let Some(extractor) = env.extractors.get(workflow.language()) else {
            return ctx;
        };

        let computed: Vec<(ProjectFile, BTreeSet<ProjectFile>)> = ctx
            .primary_files
            .par_iter()
            .filter_map(|primary| {
                let related = match workflow.task() {
                    Task::Refactor | Task::Other => {
                        related_files(extractor, &env.root, primary, &[], &ctx.project_files)
                    }
                    Task::GenerateTests => {
                        test_related_files(extractor, &env.root, primary, &ctx.project_files)?
                    }
                };
                Some((primary.clone(), related))
            })
            .collect();

        let mut readonly_files = ctx.readonly_files.clone();
        for (primary, related) in computed {
            merge_entry(&mut readonly_files, primary, related);
        }

        Context {
            readonly_files,
            ..ctx
        }
    }
}

/// Files referenced by `file` that exist in the project, excluding `file` and `also_exclude`
fn related_files(
    extractor: &dyn ReferenceExtractor,
    root: &Path,
    file: &str,
    also_exclude: &[&str],
    project_files: &BTreeSet<ProjectFile>,
) -> BTreeSet<ProjectFile> {
    let references = match extractor.read_references(&root.join(file)) {
        Ok(references) => references,
        Err(e) => {
            tracing::debug!(file, error = %e, "treating unreadable file as having no references");
            Vec::new()
        }
    };

    references
        .iter()
        .map(|reference| namespace_to_path(reference))
        .filter(|path| path != file && !also_exclude.contains(&path.as_str()))
        .filter(|path| project_files.contains(path))
        .collect()
}

/// Implementation file of a test plus the implementation's related files.
/// Returns None when `test_file` is not a test file.
fn test_related_files(
    extractor: &dyn ReferenceExtractor,
    root: &Path,
    test_file: &str,
    project_files: &BTreeSet<ProjectFile>,
) -> Option<BTreeSet<ProjectFile>> {
    let implementation = implementation_path_for_test(test_file)?;
    let mut related = BTreeSet::new();

    if root.join(&implementation).is_file() {
        related.extend(related_files(
            extractor,
            root,
            &implementation,
            &[test_file],
            project_files,
        ));
        related.insert(implementation);
    } else {
        tracing::debug!(test_file, implementation = %implementation, "no implementation file");
    }

    Some(related)
}

/// Union `related` into the entry for `primary`; drop the key if the result is empty
fn merge_entry(
    readonly_files: &mut BTreeMap<ProjectFile, BTreeSet<ProjectFile>>,
    primary: ProjectFile,
    related: BTreeSet<ProjectFile>,
) {
    let mut merged = readonly_files.remove(&primary).unwrap_or_default();
    merged.extend(related);
    if !merged.is_empty() {
        readonly_files.insert(primary, merged);
    }
}
