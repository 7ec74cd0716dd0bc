//! MINI writer: converts a [`Section`] tree back into text.
//!
//! Output layout for a section with prefix `p`:
//!
//! ```text
//! # comment of key
//! key = value
//! other = 1
//!                 <- blank line after the values, only if there are any
//! # comment of child
//! [p.child]
//! ...             <- child written recursively with prefix `p.child`
//! ```
//!
//! Values and children are written in insertion order, so a parsed file is
//! written back in its original order. Trailing comments stored on the root
//! close the document.

use crate::error::{ErrorKind, Result};
use crate::section::{is_valid_name, Section};

/// Serialize a root section to MINI text.
///
/// # Errors
/// `InvalidName` for a key or section name outside `[A-Za-z0-9_]+`,
/// `InvalidComment` for a comment line without a leading `#`, and any value
/// serialization error (non-finite float, mixed array, nesting too deep).
pub fn write(root: &Section) -> Result<String> {
    let mut out = String::new();
    write_section(root, "", &mut out)?;
    push_comments(&mut out, root.comments())?;
    Ok(out)
}

fn write_section(section: &Section, prefix: &str, out: &mut String) -> Result<()> {
    if section.value_count() > 0 {
        for (key, entry) in section.values() {
            if !is_valid_name(key) {
                tracing::debug!(key, "invalid name for key");
                return Err(ErrorKind::InvalidName.into());
            }
            push_comments(out, &entry.comments)?;
            let text = entry.value.to_text().inspect_err(|e| {
                tracing::debug!(key, error = %e, "value cannot be written");
            })?;
            out.push_str(key);
            out.push_str(" = ");
            push_line(out, &text);
        }
        out.push('\n');
    }

    for (name, child) in section.sections() {
        if !is_valid_name(name) {
            tracing::debug!(section = name, "invalid name for section");
            return Err(ErrorKind::InvalidName.into());
        }
        push_comments(out, child.comments())?;
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        out.push('[');
        out.push_str(&path);
        push_line(out, "]");
        write_section(child, &path, out)?;
    }
    Ok(())
}

/// Emit comment lines. Each must start with `#` and hold no line break.
fn push_comments(out: &mut String, comments: &[String]) -> Result<()> {
    for comment in comments {
        if !comment.starts_with('#') || comment.contains(['\n', '\r']) {
            tracing::debug!(comment = comment.as_str(), "invalid comment line");
            return Err(ErrorKind::InvalidComment.into());
        }
        push_line(out, comment);
    }
    Ok(())
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
