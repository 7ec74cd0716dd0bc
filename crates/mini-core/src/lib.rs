//! # mini-core
//!
//! Pure-Rust parser and writer for **MINI**, a human-readable configuration
//! format with typed values and nested sections.
//!
//! ```text
//! # Window settings
//! [game.window]
//! title = "Demo\tGame"
//! dimensions = [1280, 720]
//! close_flags = 0101b
//! mask = 0ffh
//! scale = 1.5f
//! vsync = true
//! ```
//!
//! Values are strings, integers (decimal, hex `h`, binary `b`), floats
//! (`f` suffix), booleans and homogeneous arrays. Sections nest through dotted
//! header paths and are addressed the same way from code.
//!
//! ## Quick start
//!
//! ```rust
//! use mini_core::{parse, write};
//!
//! let text = "[game]\nyear = 2025\nmask = 0ffh\n";
//! let mut root = parse(text).unwrap();
//! assert_eq!(*root.get::<i64>("game.year").unwrap(), 2025);
//!
//! root.section_mut("game").unwrap().set_value("name", "Pong", false).unwrap();
//! assert_eq!(
//!     write(&root).unwrap(),
//!     "[game]\nyear = 2025\nmask = ffh\nname = \"Pong\"\n\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`] — value model and token codec
//! - [`section`] — section tree and dotted-path access
//! - [`parser`] — MINI text → [`Section`]
//! - [`writer`] — [`Section`] → MINI text
//! - [`file`] — [`MiniFile`], file-backed parse/write
//! - [`json`] — JSON export of a parsed tree
//! - [`error`] — error codes and result types
//!
//! ## Diagnostics
//!
//! Failures are reported through `tracing` events (`debug` for parse and
//! write errors, `trace` for section creation and file I/O). Install any
//! subscriber to receive them; they never change an operation's result.

pub mod error;
pub mod file;
pub mod json;
pub mod parser;
pub mod section;
pub mod value;
pub mod writer;

pub use error::{ErrorKind, MiniError, Outcome, Result};
pub use file::MiniFile;
pub use json::to_json;
pub use parser::{parse, parse_into, ParseMode};
pub use section::{is_valid_name, Section};
pub use value::{Entry, FromValue, IntStyle, Value, ValueTag, MAX_ARRAY_DEPTH};
pub use writer::write;
