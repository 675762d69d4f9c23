//! @dose
//! purpose: The context-assembly pipeline. Each Stage takes a Context by value and returns
//!     the next one; Pipeline::run folds the configured stages over the initial Context.
//!
//! when-editing:
//!     - !Stages must not touch shared mutable state; everything they need is in Environment
//!     - !The standard order is discover, select, global readonly, readonly, render
//!     - Global readonly and readonly are independent and may be swapped
//!
//! invariants:
//!     - For an unsupported language no files are discovered, so nothing is rendered
//!     - An unknown task is not unsupported: it runs the generic workflow
//!     - Pipeline::run is deterministic for a fixed filesystem and Environment
//!
//! flows:
//!     - Discover: walk the project root for source files
//!     - Select: apply the substring filter
//!     - Global readonly: merge the workflow baseline
//!     - Readonly: per primary file, related files via reference extraction
//!     - Render: one command string per primary file

mod discover;
mod global;
mod readonly;
mod render;
mod select;

use crate::config::{BaselineTable, Config, DEFAULT_INVOCATION};
use crate::exclusion::{ExclusionConfig, ExclusionMatcher};
use crate::parser::ExtractorFactory;
use crate::types::Context;
use std::path::{Path, PathBuf};

pub use discover::Discover;
pub use global::GlobalReadonly;
pub use readonly::Readonly;
pub use render::Render;
pub use select::SelectPrimary;

/// Read-only inputs shared by every stage
pub struct Environment {
    pub root: PathBuf,
    pub baselines: BaselineTable,
    pub exclusions: ExclusionMatcher,
    pub extractors: ExtractorFactory,
    pub invocation: String,
}

impl Environment {
    /// Environment with built-in defaults rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            baselines: BaselineTable::defaults(),
            exclusions: ExclusionMatcher::default(),
            extractors: ExtractorFactory::new(),
            invocation: DEFAULT_INVOCATION.to_string(),
        }
    }

    /// Environment built from aidex.toml plus CLI exclude patterns
    pub fn from_config(root: &Path, config: &Config, cli_excludes: &[String]) -> Self {
        Self {
            root: root.to_path_buf(),
            baselines: config.baseline_table(),
            exclusions: ExclusionConfig::new(&config.exclude, cli_excludes).matcher(),
            extractors: ExtractorFactory::new(),
            invocation: config.invocation.clone(),
        }
    }
}

/// One transformation of the Context
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: Context, env: &Environment) -> Context;
}

/// Ordered list of stages
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Discover, select, global readonly, readonly, render
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Discover),
            Box::new(SelectPrimary),
            Box::new(GlobalReadonly),
            Box::new(Readonly),
            Box::new(Render),
        ])
    }

    pub fn run(&self, ctx: Context, env: &Environment) -> Context {
        self.stages.iter().fold(ctx, |ctx, stage| {
            let next = stage.apply(ctx, env);
            tracing::debug!(
                stage = stage.name(),
                project_files = next.project_files.len(),
                primary_files = next.primary_files.len(),
                readonly_keys = next.readonly_files.len(),
                commands = next.commands.len(),
                "stage complete"
            );
            next
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn primary_one_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "lib/primary_one.ex",
            "defmodule PrimaryOne do\n  alias PrimaryOne.HelperA\n  alias PrimaryOne.HelperB\nend\n",
        );
        write(
            temp_dir.path(),
            "lib/primary_one/helper_a.ex",
            "defmodule PrimaryOne.HelperA do\nend\n",
        );
        write(
            temp_dir.path(),
            "lib/primary_one/helper_b.ex",
            "defmodule PrimaryOne.HelperB do\nend\n",
        );
        temp_dir
    }

    #[test]
    fn test_primary_one_scenario() {
        let temp_dir = primary_one_project();
        let env = Environment::new(temp_dir.path());
        let ctx = Pipeline::standard().run(Context::new("elixir", "Refactor code"), &env);

        assert_eq!(ctx.project_files.len(), 3);
        assert_eq!(ctx.primary_files, ctx.project_files);

        let related: Vec<_> = ctx.readonly_files["lib/primary_one.ex"].iter().collect();
        assert_eq!(
            related,
            vec!["lib/primary_one/helper_a.ex", "lib/primary_one/helper_b.ex"]
        );
        assert!(!ctx.readonly_files.contains_key("lib/primary_one/helper_a.ex"));
        assert_eq!(ctx.commands.len(), 3);
        assert_eq!(
            ctx.commands["lib/primary_one.ex"],
            "aider --read docs/coding_guidelines.md --read lib/primary_one/helper_a.ex \
             --read lib/primary_one/helper_b.ex --file lib/primary_one.ex"
        );
    }

    #[test]
    fn test_nonmatching_filter() {
        let temp_dir = primary_one_project();
        let env = Environment::new(temp_dir.path());
        let ctx = Context::new("elixir", "Refactor code")
            .with_filter(Some("nonexistent_string_pattern".to_string()));
        let ctx = Pipeline::standard().run(ctx, &env);

        assert_eq!(ctx.project_files.len(), 3);
        assert!(ctx.primary_files.is_empty());
        assert!(ctx.readonly_files.is_empty());
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_empty_project_keeps_baseline() {
        let temp_dir = TempDir::new().unwrap();
        let env = Environment::new(temp_dir.path());
        let ctx = Pipeline::standard().run(Context::new("elixir", "Generate tests"), &env);

        assert!(ctx.project_files.is_empty());
        assert!(ctx.primary_files.is_empty());
        assert!(ctx.readonly_files.is_empty());
        assert_eq!(
            ctx.global_readonly_files,
            env.baselines
                .get(crate::types::Workflow::ElixirGenerateTests)
        );
    }

    #[test]
    fn test_unsupported_language_passes_through() {
        let temp_dir = primary_one_project();
        let env = Environment::new(temp_dir.path());
        let ctx = Pipeline::standard().run(Context::new("cobol", "Refactor code"), &env);

        assert!(ctx.project_files.is_empty());
        assert!(ctx.global_readonly_files.is_empty());
        assert!(ctx.readonly_files.is_empty());
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_from_config_applies_settings() {
        let temp_dir = primary_one_project();
        let config = Config {
            invocation: "aider --yes".to_string(),
            exclude: vec!["lib/primary_one/helper_b.ex".to_string()],
            ..Config::default()
        };
        let env = Environment::from_config(temp_dir.path(), &config, &[]);
        let ctx = Context::new("elixir", "refactor").with_filter(Some("primary_one.ex".to_string()));
        let ctx = Pipeline::standard().run(ctx, &env);

        assert_eq!(ctx.project_files.len(), 2);
        assert_eq!(
            ctx.commands["lib/primary_one.ex"],
            "aider --yes --read docs/coding_guidelines.md --read lib/primary_one/helper_a.ex \
             --file lib/primary_one.ex"
        );
    }
}
