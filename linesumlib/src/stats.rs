//! Tally data structures.
//!
//! A run produces one [`Subtotal`] per enumeration strategy (explicit files,
//! flat directories, recursive directories). The three are gathered in a
//! [`Tally`], whose [`Tally::total`] is the grand total.
//!
//! Recoverable failures never abort a run. Each one becomes a [`Skip`] on
//! the subtotal of the strategy that hit it.

use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;
use std::path::PathBuf;

/// Where in the per-item pipeline a recoverable failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    /// The absolute path could not be computed
    Resolve,
    /// A flat directory could not be listed
    List,
    /// The recursive walk reported a broken entry
    Walk,
    /// A directory could not be entered; its whole subtree was pruned
    PermissionDenied,
    /// The file could not be opened
    Open,
    /// Reading failed part way through; the partial count was kept
    Read,
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipStage::Resolve => "resolve",
            SkipStage::List => "list",
            SkipStage::Walk => "walk",
            SkipStage::PermissionDenied => "permission denied",
            SkipStage::Open => "open",
            SkipStage::Read => "read",
        };
        f.write_str(s)
    }
}

impl SkipStage {
    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            SkipStage::Resolve => "could not get the absolute path",
            SkipStage::List => "could not list directory",
            SkipStage::Walk => "error at file or directory",
            SkipStage::PermissionDenied => "permission denied, skipping this directory",
            SkipStage::Open => "could not open file",
            SkipStage::Read => "error reading file",
        }
    }
}

/// A single recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skip {
    /// The path that failed.
    pub path: PathBuf,
    /// The stage it failed at.
    pub stage: SkipStage,
    /// Error text.
    pub message: String,
}

impl Skip {
    /// Record `message` as the failure of `path` at `stage`.
    pub fn new(path: impl Into<PathBuf>, stage: SkipStage, message: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            stage,
            message: message.to_string(),
        }
    }
}

/// Line count of one file, kept only when requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCount {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Newlines counted (possibly partial, see [`SkipStage::Read`]).
    pub lines: u64,
}

/// Result of one enumeration strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subtotal {
    /// Lines counted
    pub lines: u64,
    /// Files opened and counted (including ones with a read error)
    pub files: u64,
    /// Recoverable failures, in the order they happened
    pub skipped: Vec<Skip>,
    /// Per-file counts (only filled when `CountOptions::keep_files` is set)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_counts: Vec<FileCount>,
}

impl Subtotal {
    /// Create an empty subtotal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one counted file into the subtotal.
    pub fn add_file(&mut self, lines: u64) {
        self.lines += lines;
        self.files += 1;
    }

    /// Record a recoverable failure.
    pub fn skip(&mut self, skip: Skip) {
        self.skipped.push(skip);
    }
}

impl AddAssign for Subtotal {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.files += other.files;
        self.skipped.extend(other.skipped);
        self.file_counts.extend(other.file_counts);
    }
}

/// The grand tally for one run: one subtotal per strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Flat directory scans (`--dir`)
    pub dirs: Subtotal,
    /// Recursive directory walks (`--rdir`)
    pub rec_dirs: Subtotal,
    /// Explicit files (`--file`)
    pub files: Subtotal,
}

impl Tally {
    /// Create a new empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grand total of lines across all strategies.
    pub fn total(&self) -> u64 {
        self.dirs.lines + self.rec_dirs.lines + self.files.lines
    }

    /// Number of files counted across all strategies.
    pub fn files_counted(&self) -> u64 {
        self.dirs.files + self.rec_dirs.files + self.files.files
    }

    /// All recorded failures, strategy by strategy.
    pub fn skipped(&self) -> impl Iterator<Item = &Skip> {
        self.dirs
            .skipped
            .iter()
            .chain(&self.rec_dirs.skipped)
            .chain(&self.files.skipped)
    }
}
