//! @dose
//! purpose: This module decides which project-relative paths are left out of discovery:
//!     the fixed build/dependency/private prefixes plus glob patterns from aidex.toml and
//!     the CLI --exclude flag.
//!
//! when-editing:
//!     - !Default prefixes are matched against the start of the relative path only
//!     - Patterns come from aidex.toml exclude array and CLI --exclude flags
//!
//! invariants:
//!     - Default exclusions (_build, deps, priv) are always applied
//!     - CLI --exclude patterns are combined with aidex.toml exclude patterns
//!
//! do-not:
//!     - Never remove default exclusions without explicit user override

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Build output, fetched dependencies and private assets
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["_build/", "deps/", "priv/"];

/// Configuration for file exclusion during directory walking
#[derive(Debug, Clone, Default)]
pub struct ExclusionConfig {
    /// Glob patterns to exclude (from aidex.toml and --exclude flags)
    pub patterns: Vec<String>,
}

impl ExclusionConfig {
    pub fn new(config_patterns: &[String], cli_patterns: &[String]) -> Self {
        let mut patterns = config_patterns.to_vec();
        patterns.extend(cli_patterns.iter().cloned());
        Self { patterns }
    }

    /// Compile into a matcher; invalid patterns are skipped with a warning
    pub fn matcher(&self) -> ExclusionMatcher {
        ExclusionMatcher {
            globs: build_exclude_globset(&self.patterns),
        }
    }
}

/// Compiled exclusion rules
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    globs: Option<GlobSet>,
}

impl ExclusionMatcher {
    /// Whether a project-relative path (forward slashes) is excluded
    pub fn is_excluded(&self, relative: &str) -> bool {
        if is_default_excluded(relative) {
            return true;
        }
        self.globs
            .as_ref()
            .is_some_and(|globs| globs.is_match(relative))
    }
}

/// Build a GlobSet from patterns
pub fn build_exclude_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!(pattern = %pattern, error = %e, "invalid exclude pattern");
            }
        }
    }

    builder.build().ok()
}

/// Check if a relative path starts with one of the default excluded prefixes
pub fn is_default_excluded(relative: &str) -> bool {
    DEFAULT_EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| relative.starts_with(prefix))
}
