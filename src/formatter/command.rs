//! @dose
//! purpose: Renders the aider command line for one primary file: invocation, --read flags
//!     for global and per-file readonly files, --file for the target, and an optional
//!     --message built from the positive and negative prompts.
//!
//! when-editing:
//!     - !Flag order is fixed: globals, then per-file readonly, then --file, then --message
//!     - !Escape backslashes before quotes, otherwise inserted backslashes get doubled
//!
//! invariants:
//!     - Blank prompts (after trimming) never produce a --message flag
//!     - Paths are emitted as-is; quoting them is the executor's concern
//!     - A path never gets more than one --read, even if it is both global and per-file

use std::collections::BTreeSet;

pub const READ_FLAG: &str = "--read";
pub const FILE_FLAG: &str = "--file";
pub const MESSAGE_FLAG: &str = "--message";

const POSITIVE_LABEL: &str = "Positive prompt:";
const NEGATIVE_LABEL: &str = "Negative prompt:";

/// Everything needed to render one command
pub struct CommandSpec<'a> {
    pub invocation: &'a str,
    pub global_readonly: &'a BTreeSet<String>,
    pub readonly: Option<&'a BTreeSet<String>>,
    pub primary: &'a str,
    pub positive_prompt: Option<&'a str>,
    pub negative_prompt: Option<&'a str>,
}

pub fn render_command(spec: &CommandSpec<'_>) -> String {
    let mut parts: Vec<String> = vec![spec.invocation.to_string()];

    let per_file = spec
        .readonly
        .into_iter()
        .flatten()
        .filter(|path| !spec.global_readonly.contains(*path));
    for path in spec.global_readonly.iter().chain(per_file) {
        parts.push(format!("{} {}", READ_FLAG, path));
    }

    parts.push(format!("{} {}", FILE_FLAG, spec.primary));

    if let Some(message) = build_message(spec.positive_prompt, spec.negative_prompt) {
        parts.push(format!("{} {}", MESSAGE_FLAG, quote(&message)));
    }

    parts.join(" ")
}

/// Labeled message text, or None when both prompts are blank
pub fn build_message(positive: Option<&str>, negative: Option<&str>) -> Option<String> {
    let positive = positive.map(str::trim).filter(|p| !p.is_empty());
    let negative = negative.map(str::trim).filter(|n| !n.is_empty());

    match (positive, negative) {
        (Some(p), Some(n)) => Some(format!(
            "{} {}\n{} {}",
            POSITIVE_LABEL, p, NEGATIVE_LABEL, n
        )),
        (Some(p), None) => Some(format!("{} {}", POSITIVE_LABEL, p)),
        (None, Some(n)) => Some(format!("{} {}", NEGATIVE_LABEL, n)),
        (None, None) => None,
    }
}

/// Double backslashes, escape double quotes, wrap in double quotes
pub fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
