//! @dose
//! purpose: Regex-based reference extraction for Elixir sources. Finds the first defmodule
//!     and the alias/import/require/use statements that point back into the same namespace.
//!
//! when-editing:
//!     - !This is a line-oriented heuristic, not a parser; keep it that way
//!     - The reference pattern is built per namespace root, with the root regex-escaped
//!
//! invariants:
//!     - Only statements at the start of a line count (commented-out lines are ignored)
//!     - The root must match a whole identifier: `Foo` never matches `FooWeb`
//!
//! gotchas:
//!     - Multi-alias `alias Foo.{Bar, Baz}` expands to Foo, Foo.Bar and Foo.Baz

use crate::parser::ReferenceExtractor;
use crate::types::NamespaceReference;
use once_cell::sync::Lazy;
use regex::Regex;

static DEFMODULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*defmodule[ \t]+([A-Z][A-Za-z0-9_]*(?:\.[A-Z][A-Za-z0-9_]*)*)")
        .expect("defmodule pattern is valid")
});

static MODULE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9_]*(?:\.[A-Z][A-Za-z0-9_]*)*$")
        .expect("module name pattern is valid")
});

/// Reference extractor for `.ex`/`.exs` files
#[derive(Clone, Default)]
pub struct ElixirExtractor;

impl ElixirExtractor {
    pub fn new() -> Self {
        Self
    }

    fn reference_pattern(root: &str) -> Option<Regex> {
        let pattern = format!(
            r"(?m)^[ \t]*(?:alias|import|require|use)[ \t]+({}(?:\.[A-Z][A-Za-z0-9_]*)*)\b(?:\.\{{([^}}]*)\}})?",
            regex::escape(root)
        );
        match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::debug!(root, error = %e, "could not build reference pattern");
                None
            }
        }
    }
}

impl ReferenceExtractor for ElixirExtractor {
    fn language_name(&self) -> &'static str {
        "elixir"
    }

    fn declared_namespace(&self, source: &str) -> Option<NamespaceReference> {
        DEFMODULE
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn same_namespace_references(&self, source: &str, root: &str) -> Vec<NamespaceReference> {
        let Some(pattern) = Self::reference_pattern(root) else {
            return Vec::new();
        };

        let mut refs: Vec<NamespaceReference> = Vec::new();
        let mut push = |name: String| {
            if !refs.contains(&name) {
                refs.push(name);
            }
        };

        for caps in pattern.captures_iter(source) {
            let Some(base) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };

            match caps.get(2) {
                Some(group) => {
                    push(base.to_string());
                    for child in group.as_str().split(',').map(str::trim) {
                        if MODULE_NAME.is_match(child) {
                            push(format!("{}.{}", base, child));
                        }
                    }
                }
                None => push(base.to_string()),
            }
        }

        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: &str = r#"defmodule PrimaryOne do
  alias PrimaryOne.HelperA
  alias PrimaryOne.HelperB
  alias Ecto.Changeset

  def run, do: HelperA.go() && HelperB.go()
end
"#;

    #[test]
    fn test_declared_namespace() {
        let extractor = ElixirExtractor::new();
        assert_eq!(
            extractor.declared_namespace(PRIMARY),
            Some("PrimaryOne".to_string())
        );
        assert_eq!(
            extractor.declared_namespace("defmodule Shop.Cart.Item do\nend\n"),
            Some("Shop.Cart.Item".to_string())
        );
        assert_eq!(extractor.declared_namespace("IO.puts(:hello)\n"), None);
    }

    #[test]
    fn test_first_declaration_wins() {
        let source = "defmodule Outer.Mod do\n  defmodule Inner do\n  end\nend\n";
        assert_eq!(
            ElixirExtractor::new().declared_namespace(source),
            Some("Outer.Mod".to_string())
        );
    }

    #[test]
    fn test_same_namespace_references() {
        let refs = ElixirExtractor::new().extract_references(PRIMARY);
        assert_eq!(refs, vec!["PrimaryOne.HelperA", "PrimaryOne.HelperB"]);
    }

    #[test]
    fn test_no_declaration_means_no_references() {
        let source = "alias PrimaryOne.HelperA\n";
        assert!(ElixirExtractor::new().extract_references(source).is_empty());
    }

    #[test]
    fn test_root_is_word_anchored() {
        let source = "defmodule Shop.Cart do\n  use ShopWeb, :controller\n  alias Shopping.List\n  import Shop.Pricing\nend\n";
        let refs = ElixirExtractor::new().extract_references(source);
        assert_eq!(refs, vec!["Shop.Pricing"]);
    }

    #[test]
    fn test_all_reference_keywords_and_dedup() {
        let source = r#"defmodule App.Worker do
  use App.Base
  import App.Helpers
  require App.Logger
  alias App.Repo
  alias App.Repo, as: R
  # alias App.Commented
end
"#;
        let refs = ElixirExtractor::new().extract_references(source);
        assert_eq!(
            refs,
            vec!["App.Base", "App.Helpers", "App.Logger", "App.Repo"]
        );
    }

    #[test]
    fn test_multi_alias_expansion() {
        let source = "defmodule App do\n  alias App.Accounts.{User, Team.Member, lower}\nend\n";
        let refs = ElixirExtractor::new().extract_references(source);
        assert_eq!(
            refs,
            vec!["App.Accounts", "App.Accounts.User", "App.Accounts.Team.Member"]
        );
    }

    #[test]
    fn test_root_only_reference() {
        let source = "defmodule App.Sub do\n  alias App\nend\n";
        let refs = ElixirExtractor::new().extract_references(source);
        assert_eq!(refs, vec!["App"]);
    }
}
