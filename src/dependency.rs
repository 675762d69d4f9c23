//! @dose
//! purpose: Pure path conventions shared by the pipeline: mapping module names to the file
//!     that conventionally defines them, and pairing test files with implementation files.
//!
//! when-editing:
//!     - !Path normalization must use forward slashes for cross-platform consistency
//!     - Everything here is lexical; no filesystem IO
//!
//! invariants:
//!     - namespace_to_path is total over well-formed dotted identifiers
//!     - All returned paths are project-relative

/// Source directory modules map into
pub const SOURCE_DIR: &str = "lib/";
/// Test directory test files live under
pub const TEST_DIR: &str = "test/";
/// Suffix of an Elixir test file
pub const TEST_SUFFIX: &str = "_test.exs";
/// Suffix of an Elixir implementation file
pub const SOURCE_SUFFIX: &str = ".ex";

/// Convert a CamelCase segment to snake_case.
///
/// Acronym runs stay together: `HTTPClient` becomes `http_client`.
pub fn underscore(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

/// Map a dotted module name to the file that conventionally defines it.
///
/// `Foo` -> `lib/foo.ex`, `Foo.Bar.Baz` -> `lib/foo/bar/baz.ex`
pub fn namespace_to_path(reference: &str) -> String {
    let segments: Vec<String> = reference.split('.').map(underscore).collect();
    format!("{}{}{}", SOURCE_DIR, segments.join("/"), SOURCE_SUFFIX)
}

/// Implementation file for a test file, or None if the path is not a test file.
///
/// `test/foo/bar_test.exs` -> `lib/foo/bar.ex`
pub fn implementation_path_for_test(test_path: &str) -> Option<String> {
    let inner = test_path
        .strip_prefix(TEST_DIR)?
        .strip_suffix(TEST_SUFFIX)?;
    if inner.is_empty() || inner.ends_with('/') {
        return None;
    }
    Some(format!("{}{}{}", SOURCE_DIR, inner, SOURCE_SUFFIX))
}

/// Normalize path separators to forward slashes for cross-platform consistency
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
