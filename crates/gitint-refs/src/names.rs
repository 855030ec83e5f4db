//! Branch name validation.
//!
//! Branch names arrive from the command line and are joined onto the
//! `refs/heads` directory, so they are checked against git-style rules
//! first. A valid name:
//! - is non-empty and contains no whitespace, control characters, or any of
//!   `~ ^ : ? * [ \`
//! - contains neither `..` nor `@{`
//! - has no empty `/`-separated component (so no leading, trailing or
//!   doubled slash)
//! - has no component starting with `.` or ending with `.lock`
//! - does not end with `.`

use crate::error::{RefError, Result};

/// Characters that are forbidden anywhere in a branch name.
const FORBIDDEN_CHARS: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

/// Validate a branch name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use gitint_refs::names::validate_branch_name;
///
/// assert!(validate_branch_name("main").is_ok());
/// assert!(validate_branch_name("feature/auth").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("../../config").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> Result<()> {
    let reject = |reason: String| {
        Err(RefError::InvalidBranchName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return reject("must not be empty".into());
    }
    if let Some(ch) = name
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(c))
    {
        return reject(format!("contains forbidden character {ch:?}"));
    }
    for sequence in ["..", "@{"] {
        if name.contains(sequence) {
            return reject(format!("must not contain {sequence:?}"));
        }
    }
    if name.ends_with('.') {
        return reject("must not end with '.'".into());
    }
    for component in name.split('/') {
        if component.is_empty() {
            return reject("has an empty path component".into());
        }
        if component.starts_with('.') {
            return reject(format!("component {component:?} starts with '.'"));
        }
        if component.ends_with(".lock") {
            return reject(format!("component {component:?} ends with '.lock'"));
        }
    }

    Ok(())
}
