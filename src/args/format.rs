//! Token formatting helpers.

use std::path::{Component, Path, PathBuf};

/// Characters (beyond whitespace) that force quoting of a scalar value.
const SPECIAL: &[char] = &['"', '\'', '&', '|', '<', '>', '^', '(', ')', ';', '*', '?', '$'];

/// Culture-invariant boolean form expected by the tool.
pub(crate) fn bool_str(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Quote a scalar value only when it contains whitespace or a
/// shell-special character. Connection strings and `/p:`/`/v:` tokens
/// never go through here.
pub(crate) fn scalar(value: &str) -> String {
    if value.chars().any(|c| c.is_whitespace()) || value.contains(SPECIAL) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Resolve a path against the working directory and normalize out
/// `.` and `..` components, without touching the filesystem.
pub fn resolve_path(path: &Path, working_dir: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    resolved.push(component.as_os_str());
                }
            }
            _ => resolved.push(component.as_os_str()),
        }
    }
    resolved
}

/// Path values are always double-quoted, whitespace or not.
pub(crate) fn quoted_path(path: &Path, working_dir: &Path) -> String {
    format!("\"{}\"", resolve_path(path, working_dir).display())
}
