//! The section tree: named child sections and keyed values, addressed by
//! dotted paths such as `game.window.width`.
//!
//! Every section owns its values and child sections outright. Both maps keep
//! insertion order, which is also the order the writer emits them in.

use crate::error::{ErrorKind, Outcome, Result};
use crate::value::{Entry, FromValue, Value};
use indexmap::IndexMap;

/// A node of the configuration tree. The root section has no name and holds
/// the top-level sections; values are normally only placed in named sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    values: IndexMap<String, Entry>,
    sections: IndexMap<String, Section>,
    comments: Vec<String>,
}

/// Test if `name` is a valid key or section name: one or more of `[A-Za-z0-9_]`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `path` at its first `.` into the head segment and the remainder.
fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comment lines written directly above this section's header.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }

    /// Values of this section, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Child sections, in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// True when the section has no values and no child sections.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.sections.is_empty()
    }

    /// Drop all values, child sections and comments.
    pub fn clear(&mut self) {
        self.values.clear();
        self.sections.clear();
        self.comments.clear();
    }

    /// Look up the entry at a dotted path. All segments but the last name
    /// child sections; the last names a key.
    pub fn entry(&self, path: &str) -> Result<&Entry> {
        match split_path(path) {
            (head, Some(rest)) => self
                .sections
                .get(head)
                .ok_or(ErrorKind::SectionNotPresent)?
                .entry(rest),
            (key, None) => Ok(self.values.get(key).ok_or(ErrorKind::KeyNotPresent)?),
        }
    }

    pub fn entry_mut(&mut self, path: &str) -> Result<&mut Entry> {
        match split_path(path) {
            (head, Some(rest)) => self
                .sections
                .get_mut(head)
                .ok_or(ErrorKind::SectionNotPresent)?
                .entry_mut(rest),
            (key, None) => Ok(self
                .values
                .get_mut(key)
                .ok_or(ErrorKind::KeyNotPresent)?),
        }
    }

    /// Untyped value lookup.
    pub fn value(&self, path: &str) -> Result<&Value> {
        self.entry(path).map(|entry| &entry.value)
    }

    /// Typed value lookup.
    ///
    /// ```
    /// use mini_core::parse;
    ///
    /// let root = parse("[a.b.c]\nx = 1").unwrap();
    /// assert_eq!(*root.get::<i64>("a.b.c.x").unwrap(), 1);
    /// ```
    ///
    /// # Errors
    /// `SectionNotPresent` if an intermediate section is missing,
    /// `KeyNotPresent` if the key is missing, `InvalidDataType` if the value
    /// is not a `T`.
    pub fn get<T: FromValue>(&self, path: &str) -> Result<&T> {
        let value = self.value(path)?;
        T::from_value(value).ok_or_else(|| {
            tracing::debug!(path, expected = %T::TAG, found = %value.tag(), "value has a different type");
            ErrorKind::InvalidDataType.into()
        })
    }

    /// Typed lookup that falls back to `default` on any failure.
    pub fn get_or<T: FromValue + Clone>(&self, path: &str, default: T) -> T {
        self.get::<T>(path).cloned().unwrap_or(default)
    }

    /// Insert a value under a single-level `name` (no path traversal).
    ///
    /// Returns `Outcome::ValueOverwritten` if `allow_overwrite` replaced an
    /// existing value, `KeyAlreadyPresent` if it is not allowed to.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        allow_overwrite: bool,
    ) -> Result<Outcome> {
        self.set_entry(name, Entry::new(value.into()), allow_overwrite)
    }

    /// Like [`set_value`](Self::set_value), keeping the entry's comments.
    pub fn set_entry(&mut self, name: &str, entry: Entry, allow_overwrite: bool) -> Result<Outcome> {
        if self.values.contains_key(name) {
            if !allow_overwrite {
                return Err(ErrorKind::KeyAlreadyPresent.into());
            }
            self.values.insert(name.to_string(), entry);
            return Ok(Outcome::ValueOverwritten);
        }
        self.values.insert(name.to_string(), entry);
        Ok(Outcome::Success)
    }

    /// Remove and return the value stored under a single-level `name`.
    pub fn remove_value(&mut self, name: &str) -> Option<Entry> {
        self.values.shift_remove(name)
    }

    /// Look up the section at a dotted path.
    pub fn section(&self, path: &str) -> Result<&Section> {
        let (head, rest) = split_path(path);
        let child = self
            .sections
            .get(head)
            .ok_or(ErrorKind::SectionNotPresent)?;
        match rest {
            Some(rest) => child.section(rest),
            None => Ok(child),
        }
    }

    pub fn section_mut(&mut self, path: &str) -> Result<&mut Section> {
        let (head, rest) = split_path(path);
        let child = self
            .sections
            .get_mut(head)
            .ok_or(ErrorKind::SectionNotPresent)?;
        match rest {
            Some(rest) => child.section_mut(rest),
            None => Ok(child),
        }
    }

    /// Insert a child section under a single-level `name`. Overwrite rules
    /// match [`set_value`](Self::set_value), with `SectionAlreadyPresent`.
    pub fn set_section(
        &mut self,
        name: &str,
        section: Section,
        allow_overwrite: bool,
    ) -> Result<Outcome> {
        if self.sections.contains_key(name) {
            if !allow_overwrite {
                return Err(ErrorKind::SectionAlreadyPresent.into());
            }
            self.sections.insert(name.to_string(), section);
            return Ok(Outcome::ValueOverwritten);
        }
        self.sections.insert(name.to_string(), section);
        Ok(Outcome::Success)
    }

    /// Remove and return the child section under a single-level `name`.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Child `name`, created empty if missing. The flag reports creation.
    pub(crate) fn child_or_insert(&mut self, name: &str) -> (&mut Section, bool) {
        let created = !self.sections.contains_key(name);
        let child = self.sections.entry(name.to_string()).or_default();
        (child, created)
    }
}
