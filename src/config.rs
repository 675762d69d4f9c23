//! @dose
//! purpose: Configuration file parsing for aidex.toml. Handles the aider invocation token,
//!     extra exclusion patterns, and per-workflow global readonly baselines.
//!
//! when-editing:
//!     - !Config is loaded once at startup and passed through the call chain
//!     - !A [global_readonly] entry replaces the built-in baseline for that workflow
//!
//! invariants:
//!     - Config::load returns default config if aidex.toml doesn't exist
//!     - BaselineTable is read-only once built
//!
//! gotchas:
//!     - Baseline paths are never checked against the filesystem
//!     - Unknown [global_readonly] keys are ignored with a warning

use crate::types::Workflow;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "aidex.toml";
pub const DEFAULT_INVOCATION: &str = "aider";

const GENERATE_TESTS_BASELINE: &[&str] = &[
    "docs/testing_guidelines.md",
    "test/support/conn_case.ex",
    "test/support/data_case.ex",
    "test/test_helper.exs",
];

const REFACTOR_BASELINE: &[&str] = &["docs/coding_guidelines.md"];

const GENERIC_BASELINE: &[&str] = &["docs/coding_guidelines.md"];

/// Main configuration structure matching aidex.toml
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command that starts the external editing tool
    pub invocation: String,

    /// Exclusion patterns (glob syntax, matched against relative paths)
    pub exclude: Vec<String>,

    /// Per-workflow baseline overrides, keyed like "generate-tests"
    pub global_readonly: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            invocation: DEFAULT_INVOCATION.to_string(),
            exclude: Vec::new(),
            global_readonly: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from aidex.toml in the given root directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %config_path.display(), error = %e, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Build the baseline table: built-in defaults with this config's overrides applied
    pub fn baseline_table(&self) -> BaselineTable {
        let mut table = BaselineTable::defaults();
        for (key, paths) in &self.global_readonly {
            match workflow_for_key(key) {
                Some(workflow) => {
                    table
                        .baselines
                        .insert(workflow, paths.iter().cloned().collect());
                }
                None => {
                    tracing::warn!(key = %key, "unknown workflow in [global_readonly], ignoring");
                }
            }
        }
        table
    }
}

fn workflow_for_key(key: &str) -> Option<Workflow> {
    Workflow::ALL
        .into_iter()
        .find(|w| w.config_key() == key)
}

/// Fixed supporting files attached to every command of a workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineTable {
    baselines: HashMap<Workflow, BTreeSet<String>>,
}

impl BaselineTable {
    pub fn defaults() -> Self {
        let to_set = |paths: &[&'static str]| -> BTreeSet<String> {
            paths.iter().map(|p| p.to_string()).collect()
        };
        let mut baselines = HashMap::new();
        baselines.insert(Workflow::ElixirGenerateTests, to_set(GENERATE_TESTS_BASELINE));
        baselines.insert(Workflow::ElixirRefactor, to_set(REFACTOR_BASELINE));
        baselines.insert(Workflow::ElixirGeneric, to_set(GENERIC_BASELINE));
        Self { baselines }
    }

    /// Baseline for a workflow (empty if none is registered)
    pub fn get(&self, workflow: Workflow) -> BTreeSet<String> {
        self.baselines.get(&workflow).cloned().unwrap_or_default()
    }
}

impl Default for BaselineTable {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.invocation, "aider");
        assert!(config.exclude.is_empty());
        assert!(config.global_readonly.is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path());
        assert_eq!(config.invocation, "aider");
    }

    #[test]
    fn test_load_basic_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"
invocation = "aider --yes"
exclude = ["lib/generated/**"]

[global_readonly]
generate-tests = ["docs/testing.md", "test/test_helper.exs"]
refactor = []
"#;
        fs::write(temp_dir.path().join(CONFIG_FILE), config_content).unwrap();

        let config = Config::load(temp_dir.path());
        assert_eq!(config.invocation, "aider --yes");
        assert_eq!(config.exclude, vec!["lib/generated/**"]);

        let table = config.baseline_table();
        assert_eq!(
            table
                .get(Workflow::ElixirGenerateTests)
                .into_iter()
                .collect::<Vec<_>>(),
            vec!["docs/testing.md", "test/test_helper.exs"]
        );
        assert!(table.get(Workflow::ElixirRefactor).is_empty());
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "invocation = [").unwrap();

        let config = Config::load(temp_dir.path());
        assert_eq!(config.invocation, "aider");
        assert_eq!(config.baseline_table(), BaselineTable::defaults());
    }

    #[test]
    fn test_unknown_baseline_key_ignored() {
        let mut config = Config::default();
        config
            .global_readonly
            .insert("write-docs".to_string(), vec!["README.md".to_string()]);
        assert_eq!(config.baseline_table(), BaselineTable::defaults());
    }

    #[test]
    fn test_default_baselines() {
        let table = BaselineTable::defaults();
        let tests = table.get(Workflow::ElixirGenerateTests);
        assert!(tests.contains("test/test_helper.exs"));
        assert!(tests.contains("docs/testing_guidelines.md"));
        assert_eq!(table.get(Workflow::ElixirRefactor).len(), 1);
        assert_eq!(
            table.get(Workflow::ElixirGeneric),
            table.get(Workflow::ElixirRefactor)
        );
    }
}
