//! MINI parser: converts text into a [`Section`] tree.
//!
//! The parser is a single forward pass over the input lines. Each line is
//! classified by its first character after trimming:
//!
//! - empty: ignored
//! - `#`: comment, buffered until the next section header or key-value pair
//! - `[`: section header with a dotted path, e.g. `[game.window]`
//! - anything else: `key = value` inside the current section
//!
//! The first error aborts the parse and is returned as
//! [`MiniError::Syntax`] with the 1-based line number. Everything parsed
//! before the failing line stays in the tree.

use crate::error::{ErrorKind, MiniError, Result};
use crate::section::{is_valid_name, Section};
use crate::value::{trim_blank, Entry, Value};

/// Whether parsing starts from an empty tree or merges into the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Clear the root's values, sections and comments first.
    #[default]
    Reset,
    /// Merge into the existing tree. Redeclaring an existing leaf section or
    /// key is still an error.
    Additional,
}

/// Parse a MINI document into a fresh root section.
///
/// ```
/// use mini_core::parse;
///
/// let root = parse("[server]\nport = 8080\nhost = \"localhost\"").unwrap();
/// assert_eq!(*root.get::<i64>("server.port").unwrap(), 8080);
/// assert_eq!(root.get::<String>("server.host").unwrap(), "localhost");
/// ```
pub fn parse(text: &str) -> Result<Section> {
    let mut root = Section::new();
    parse_into(&mut root, text, ParseMode::Reset)?;
    Ok(root)
}

/// Parse a MINI document into `root`.
pub fn parse_into(root: &mut Section, text: &str, mode: ParseMode) -> Result<()> {
    if mode == ParseMode::Reset {
        root.clear();
    }

    let mut parser = Parser {
        current: None,
        pending_comments: Vec::new(),
    };
    for (idx, raw) in text.lines().enumerate() {
        let line = trim_blank(raw);
        parser.parse_line(root, line).map_err(|e| {
            let kind = e.kind();
            tracing::debug!(line = idx + 1, text = line, error = %kind, "MINI parse error");
            MiniError::Syntax {
                line: idx + 1,
                kind,
            }
        })?;
    }

    // Comments after the last entry have nothing to attach to; keep them on the root.
    root.comments_mut().append(&mut parser.pending_comments);
    Ok(())
}

struct Parser {
    /// Dotted path of the current section, `None` before the first header.
    current: Option<Vec<String>>,
    pending_comments: Vec<String>,
}

impl Parser {
    fn parse_line(&mut self, root: &mut Section, line: &str) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        if line.starts_with('#') {
            self.pending_comments.push(line.to_string());
            return Ok(());
        }
        if line.starts_with('[') {
            return self.parse_section_header(root, line);
        }
        self.parse_key_value(root, line)
    }

    /// `[a.b.c]`: create missing segments, fail if the leaf already exists.
    fn parse_section_header(&mut self, root: &mut Section, line: &str) -> Result<()> {
        if !line.ends_with(']') || line.len() < 2 {
            return Err(ErrorKind::SectionExpectedClosingBracket.into());
        }
        let path = trim_blank(&line[1..line.len() - 1]);
        if path.is_empty() {
            return Err(ErrorKind::EmptySectionName.into());
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if let Some(bad) = segments.iter().find(|s| !is_valid_name(s)) {
            tracing::debug!(name = %bad, "invalid section name");
            return Err(ErrorKind::InvalidName.into());
        }

        let mut section = root;
        for (i, name) in segments.iter().enumerate() {
            let (child, created) = section.child_or_insert(name);
            if !created && i == segments.len() - 1 {
                return Err(ErrorKind::SectionAlreadyPresent.into());
            }
            if created {
                tracing::trace!(section = %name, depth = i, "created section");
            }
            section = child;
        }

        *section.comments_mut() = std::mem::take(&mut self.pending_comments);
        self.current = Some(segments);
        Ok(())
    }

    /// `key = value` inside the current section.
    fn parse_key_value(&mut self, root: &mut Section, line: &str) -> Result<()> {
        let path = self
            .current
            .as_ref()
            .ok_or(ErrorKind::KeyValuePairNotInSection)?;
        let (key, value) = line
            .split_once('=')
            .ok_or(ErrorKind::ExpectedKeyValuePair)?;
        let key = trim_blank(key);
        let value = trim_blank(value);

        if key.is_empty() {
            return Err(ErrorKind::KeyEmpty.into());
        }
        if !is_valid_name(key) {
            tracing::debug!(key, "invalid key name");
            return Err(ErrorKind::InvalidName.into());
        }
        if value.is_empty() {
            return Err(ErrorKind::ValueEmpty.into());
        }

        let value = Value::parse(value)?;
        let entry = Entry::with_comments(value, std::mem::take(&mut self.pending_comments));
        current_section(root, path).set_entry(key, entry, false)?;
        Ok(())
    }
}

/// Walk down from the root along a path the header step already created.
fn current_section<'a>(root: &'a mut Section, path: &[String]) -> &'a mut Section {
    path.iter().fold(root, |section, name| section.child_or_insert(name).0)
}
