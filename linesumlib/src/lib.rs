//! # linesumlib
//!
//! Sum newline-delimited line counts across files and directory trees.
//!
//! ## Overview
//!
//! Inputs come in three lists:
//!
//! - **Files**: counted directly
//! - **Flat directories**: only their immediate, non-directory children are counted
//! - **Recursive directories**: every non-directory entry below them is counted
//!
//! Inputs are validated up front and any bad value aborts the run. Once
//! counting starts, a failure on a single file or directory is logged,
//! recorded in the result and skipped. The run always finishes with a
//! total.
//!
//! A line is a run of bytes ending in `\n`. A final line without a trailing
//! newline is not counted.
//!
//! ## Example
//!
//! ```rust
//! use linesumlib::{count, count_lines, CountOptions, InputSpec};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let file = dir.path().join("notes.txt");
//! fs::write(&file, "first\nsecond\n").unwrap();
//!
//! // Count a single stream
//! let mut reader = fs::File::open(&file).unwrap();
//! assert_eq!(count_lines(&mut reader).unwrap(), 2);
//!
//! // Count a set of inputs
//! let inputs = InputSpec::new()
//!     .files([file.to_str().unwrap()])
//!     .validate()
//!     .unwrap();
//! let tally = count(&inputs, &CountOptions::new());
//! assert_eq!(tally.total(), 2);
//! ```

pub mod counter;
pub mod error;
pub mod lines;
pub mod source;
pub mod stats;

pub use counter::{count, count_files, count_flat_dirs, count_recursive_dirs, CountOptions};
pub use error::{InputKind, InvalidReason, LinesumError};
pub use lines::{count_lines, count_lines_with_buffer, CountError, DEFAULT_BUFFER_SIZE};
pub use source::{InputSpec, ValidatedInputs, WalkSignal};
pub use stats::{FileCount, Skip, SkipStage, Subtotal, Tally};

/// Result type for linesumlib operations
pub type Result<T> = std::result::Result<T, LinesumError>;
