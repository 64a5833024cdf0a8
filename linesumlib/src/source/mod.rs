//! Source discovery: decide which files to count.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **Input validation**: check the user's lists before any counting starts
//! - **Path resolution**: turn relative inputs into stable absolute paths
//! - **Enumeration**: flat directory listings and recursive walks
//!
//! ## Example
//!
//! ```rust
//! use linesumlib::source::{walk_tree, WalkEvent, WalkSignal};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::create_dir(dir.path().join("sub")).unwrap();
//! fs::write(dir.path().join("a.txt"), "1\n").unwrap();
//! fs::write(dir.path().join("sub/b.txt"), "2\n").unwrap();
//!
//! let mut files = Vec::new();
//! walk_tree(dir.path(), |event| {
//!     if let WalkEvent::Entry(entry) = event {
//!         if entry.file_type().is_file() {
//!             files.push(entry.file_name().to_string_lossy().to_string());
//!         }
//!     }
//!     WalkSignal::Continue
//! });
//! assert_eq!(files, vec!["a.txt", "b.txt"]);
//! ```

pub mod inputs;
pub mod walk;

pub use inputs::{resolve_absolute, InputSpec, ValidatedInputs};
pub use walk::{list_flat, walk_tree, EntryKind, FlatEntry, WalkEvent, WalkSignal};
