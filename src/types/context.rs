//! @dose
//! purpose: This module defines the Context record threaded through the pipeline, together
//!     with the closed Workflow enum that decides which language/task behaviour applies.
//!
//! when-editing:
//!     - !Context is replaced, never mutated in place, by each pipeline stage
//!     - !All path collections are ordered (BTreeSet/BTreeMap) so output is deterministic
//!     - Adding a workflow means adding a Workflow variant and a baseline entry
//!
//! invariants:
//!     - Every key of readonly_files is a member of primary_files
//!     - readonly_files never holds an empty set
//!     - Paths are project-relative with forward slashes
//!
//! gotchas:
//!     - language and task stay plain strings so an unsupported language can travel through
//!       the pipeline untouched; Workflow::resolve returns None only for those
//!     - Any task that is not a known one resolves to the generic workflow

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Project-relative path with forward-slash separators
pub type ProjectFile = String;

/// Dotted module identifier such as `Foo.Bar.Baz`
pub type NamespaceReference = String;

/// Everything the pipeline knows about one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub language: String,
    pub task: String,
    pub filter: Option<String>,
    pub project_files: BTreeSet<ProjectFile>,
    pub primary_files: BTreeSet<ProjectFile>,
    pub global_readonly_files: BTreeSet<ProjectFile>,
    pub readonly_files: BTreeMap<ProjectFile, BTreeSet<ProjectFile>>,
    pub positive_prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub commands: BTreeMap<ProjectFile, String>,
}

impl Context {
    /// Create the initial context from what the front end collected
    pub fn new(language: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            task: task.into(),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_prompts(mut self, positive: Option<String>, negative: Option<String>) -> Self {
        self.positive_prompt = positive;
        self.negative_prompt = negative;
        self
    }

    /// The workflow selected by this context's language and task, if supported
    pub fn workflow(&self) -> Option<Workflow> {
        Workflow::resolve(&self.language, &self.task)
    }

    /// The context's language, if supported
    pub fn language(&self) -> Option<Language> {
        Language::parse(&self.language)
    }
}

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Elixir,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "elixir" | "ex" => Some(Self::Elixir),
            _ => None,
        }
    }

    /// File extensions (without the leading dot) that belong to this language
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Elixir => &["ex", "exs"],
        }
    }
}

/// Known tasks; anything else is `Other` and gets the generic treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    GenerateTests,
    Refactor,
    Other,
}

impl Task {
    /// Parse a task name; case, spaces, underscores and hyphens are not significant.
    pub fn parse(value: &str) -> Self {
        let key: String = value
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "generate-tests" | "tests" => Self::GenerateTests,
            "refactor-code" | "refactor" => Self::Refactor,
            _ => Self::Other,
        }
    }
}

/// A supported (language, task) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    ElixirGenerateTests,
    ElixirRefactor,
    ElixirGeneric,
}

impl Workflow {
    pub const ALL: [Workflow; 3] = [
        Self::ElixirGenerateTests,
        Self::ElixirRefactor,
        Self::ElixirGeneric,
    ];

    /// None only when the language is unsupported
    pub fn resolve(language: &str, task: &str) -> Option<Self> {
        match (Language::parse(language)?, Task::parse(task)) {
            (Language::Elixir, Task::GenerateTests) => Some(Self::ElixirGenerateTests),
            (Language::Elixir, Task::Refactor) => Some(Self::ElixirRefactor),
            (Language::Elixir, Task::Other) => Some(Self::ElixirGeneric),
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::ElixirGenerateTests | Self::ElixirRefactor | Self::ElixirGeneric => {
                Language::Elixir
            }
        }
    }

    pub fn task(&self) -> Task {
        match self {
            Self::ElixirGenerateTests => Task::GenerateTests,
            Self::ElixirRefactor => Task::Refactor,
            Self::ElixirGeneric => Task::Other,
        }
    }

    /// Key used for this workflow in aidex.toml tables
    pub fn config_key(&self) -> &'static str {
        match self.task() {
            Task::GenerateTests => "generate-tests",
            Task::Refactor => "refactor",
            Task::Other => "default",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_parse_variants() {
        assert_eq!(Task::parse("Generate tests"), Task::GenerateTests);
        assert_eq!(Task::parse("generate_tests"), Task::GenerateTests);
        assert_eq!(Task::parse("GENERATE-TESTS"), Task::GenerateTests);
        assert_eq!(Task::parse("Refactor code"), Task::Refactor);
        assert_eq!(Task::parse("refactor"), Task::Refactor);
        assert_eq!(Task::parse("Write docs"), Task::Other);
        assert_eq!(Task::parse(""), Task::Other);
    }

    #[test]
    fn test_workflow_resolve() {
        assert_eq!(
            Workflow::resolve("elixir", "Generate tests"),
            Some(Workflow::ElixirGenerateTests)
        );
        assert_eq!(
            Workflow::resolve("Elixir", "Refactor code"),
            Some(Workflow::ElixirRefactor)
        );
        assert_eq!(Workflow::resolve("python", "Refactor code"), None);
        assert_eq!(
            Workflow::resolve("elixir", "Write docs"),
            Some(Workflow::ElixirGeneric)
        );
    }

    #[test]
    fn test_context_builders() {
        let ctx = Context::new("elixir", "Refactor code")
            .with_filter(Some("accounts".to_string()))
            .with_prompts(Some("keep it small".to_string()), None);

        assert_eq!(ctx.filter.as_deref(), Some("accounts"));
        assert_eq!(ctx.positive_prompt.as_deref(), Some("keep it small"));
        assert!(ctx.negative_prompt.is_none());
        assert_eq!(ctx.workflow(), Some(Workflow::ElixirRefactor));
        assert!(ctx.project_files.is_empty());
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_language_extensions() {
        assert_eq!(Language::Elixir.extensions(), &["ex", "exs"]);
        assert_eq!(Workflow::ElixirGenerateTests.config_key(), "generate-tests");
        assert_eq!(Workflow::ElixirRefactor.to_string(), "refactor");
        assert_eq!(Workflow::ElixirGeneric.config_key(), "default");
        assert_eq!(Context::new("Elixir", "x").language(), Some(Language::Elixir));
        assert_eq!(Context::new("ruby", "x").language(), None);
    }
}
