//! File-backed MINI documents.

use crate::error::{MiniError, Result};
use crate::parser::{parse_into, ParseMode};
use crate::section::Section;
use crate::writer::write;
use std::path::Path;

/// A MINI document: the root section plus file parse/write entry points.
///
/// ```no_run
/// use mini_core::{MiniFile, ParseMode};
///
/// let mut file = MiniFile::new();
/// file.parse("game.mini", ParseMode::Reset)?;
/// let year = file.root().get_or::<i64>("game.year", 1999);
/// file.write("game_out.mini")?;
/// # Ok::<(), mini_core::MiniError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiniFile {
    root: Section,
}

impl MiniFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse the file at `path` into the root section.
    ///
    /// With [`ParseMode::Reset`] the tree is cleared first; with
    /// [`ParseMode::Additional`] the file is merged into it. The tree is left
    /// untouched if the file cannot be read.
    pub fn parse(&mut self, path: impl AsRef<Path>, mode: ParseMode) -> Result<()> {
        let path = path.as_ref();
        tracing::trace!(path = %path.display(), ?mode, "reading MINI file");
        let text = std::fs::read_to_string(path).map_err(|source| MiniError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&text, mode)
    }

    /// Parse MINI text into the root section.
    pub fn parse_str(&mut self, text: &str, mode: ParseMode) -> Result<()> {
        parse_into(&mut self.root, text, mode)
    }

    /// Serialize the tree and write it to `path`.
    ///
    /// The text is fully built before the file is opened, so a serialization
    /// error never leaves a truncated file behind.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_text()?;
        tracing::trace!(path = %path.display(), bytes = text.len(), "writing MINI file");
        std::fs::write(path, text).map_err(|source| MiniError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize the tree to MINI text.
    pub fn to_text(&self) -> Result<String> {
        write(&self.root)
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    /// Drop the whole tree.
    pub fn clear(&mut self) {
        self.root.clear();
    }
}

impl From<Section> for MiniFile {
    fn from(root: Section) -> Self {
        Self { root }
    }
}
