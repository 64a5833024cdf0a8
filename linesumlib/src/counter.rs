//! High-level line counting API.
//!
//! Three enumeration strategies feed the same per-file pipeline
//! (resolve → open → count → accumulate):
//!
//! - [`count_files`]: explicit files
//! - [`count_flat_dirs`]: immediate children of each directory
//! - [`count_recursive_dirs`]: every file below each directory
//!
//! Each strategy returns its own [`Subtotal`] and [`count`] gathers the three
//! into a [`Tally`]. No per-item failure ever aborts a strategy; it is
//! logged, recorded as a [`Skip`] and the next item is processed.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::lines::{count_lines_with_buffer, CountError, DEFAULT_BUFFER_SIZE};
use crate::source::inputs::{resolve_absolute, ValidatedInputs};
use crate::source::walk::{
    is_permission_denied_dir, list_flat, walk_tree, EntryKind, WalkEvent, WalkSignal,
};
use crate::stats::{FileCount, Skip, SkipStage, Subtotal, Tally};

/// Options for counting lines.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// Read chunk size handed to the line counter
    pub buffer_size: usize,
    /// Whether to keep a per-file breakdown in each subtotal
    pub keep_files: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            keep_files: false,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read chunk size.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Keep per-file line counts in the results.
    pub fn keep_files(mut self, keep: bool) -> Self {
        self.keep_files = keep;
        self
    }
}

/// Count every input: flat directories, then recursive directories, then files.
///
/// # Example
///
/// ```rust
/// use linesumlib::{count, CountOptions, InputSpec};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("x.txt"), "a\nb\nc\n").unwrap();
/// fs::create_dir(dir.path().join("sub")).unwrap();
/// fs::write(dir.path().join("sub/y.txt"), "d\ne").unwrap();
///
/// let root = dir.path().to_str().unwrap();
///
/// let flat = InputSpec::new().dirs([root]).validate().unwrap();
/// assert_eq!(count(&flat, &CountOptions::new()).total(), 3);
///
/// let recursive = InputSpec::new().rec_dirs([root]).validate().unwrap();
/// assert_eq!(count(&recursive, &CountOptions::new()).total(), 4);
/// ```
pub fn count(inputs: &ValidatedInputs, options: &CountOptions) -> Tally {
    let tally = Tally {
        dirs: count_flat_dirs(inputs.dirs(), options),
        rec_dirs: count_recursive_dirs(inputs.rec_dirs(), options),
        files: count_files(inputs.files(), options),
    };

    info!(
        total = tally.total(),
        files = tally.files_counted(),
        skipped = tally.skipped().count(),
        "counting finished"
    );

    tally
}

/// Count explicit files.
pub fn count_files(paths: &[PathBuf], options: &CountOptions) -> Subtotal {
    let mut subtotal = Subtotal::new();

    for path in paths {
        count_leaf(path, options, &mut subtotal);
    }

    log_subtotal("files", &subtotal);
    subtotal
}

/// Count the immediate, non-directory children of each directory.
pub fn count_flat_dirs(dirs: &[PathBuf], options: &CountOptions) -> Subtotal {
    let mut subtotal = Subtotal::new();

    for dir in dirs {
        subtotal += count_flat_dir(dir, options);
    }

    log_subtotal("dirs", &subtotal);
    subtotal
}

fn count_flat_dir(dir: &Path, options: &CountOptions) -> Subtotal {
    let mut subtotal = Subtotal::new();

    let dir = match resolve_absolute(dir) {
        Ok(dir) => dir,
        Err(e) => {
            report(&mut subtotal, Skip::new(dir, SkipStage::Resolve, e));
            return subtotal;
        }
    };

    let entries = match list_flat(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            report(&mut subtotal, Skip::new(&dir, SkipStage::List, e));
            return subtotal;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report(&mut subtotal, Skip::new(&dir, SkipStage::List, e));
                continue;
            }
        };

        match entry.kind {
            Ok(EntryKind::Dir) => {}
            Ok(EntryKind::Special) => {
                debug!(path = %entry.path.display(), "skipping special file");
            }
            Ok(EntryKind::File) => count_leaf(&entry.path, options, &mut subtotal),
            Err(e) => report(&mut subtotal, Skip::new(&entry.path, SkipStage::List, e)),
        }
    }

    subtotal
}

/// Count every non-directory entry below each directory.
///
/// A directory that cannot be entered for lack of permission is reported
/// and its subtree pruned. Any other walk error skips only that entry.
pub fn count_recursive_dirs(dirs: &[PathBuf], options: &CountOptions) -> Subtotal {
    let mut subtotal = Subtotal::new();

    for dir in dirs {
        subtotal += count_tree(dir, options);
    }

    log_subtotal("rec_dirs", &subtotal);
    subtotal
}

fn count_tree(dir: &Path, options: &CountOptions) -> Subtotal {
    let mut subtotal = Subtotal::new();

    let root = match resolve_absolute(dir) {
        Ok(root) => root,
        Err(e) => {
            report(&mut subtotal, Skip::new(dir, SkipStage::Resolve, e));
            return subtotal;
        }
    };

    walk_tree(&root, |event| match event {
        WalkEvent::Error(err) => {
            let path = err.path().unwrap_or(&root);
            let message = err
                .io_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.to_string());

            if is_permission_denied_dir(err) {
                report(
                    &mut subtotal,
                    Skip::new(path, SkipStage::PermissionDenied, message),
                );
                WalkSignal::SkipSubtree
            } else {
                report(&mut subtotal, Skip::new(path, SkipStage::Walk, message));
                WalkSignal::SkipEntry
            }
        }
        WalkEvent::Entry(entry) => match EntryKind::of(entry.file_type()) {
            EntryKind::Dir => WalkSignal::Continue,
            EntryKind::Special => {
                debug!(path = %entry.path().display(), "skipping special file");
                WalkSignal::SkipEntry
            }
            EntryKind::File => {
                count_leaf(entry.path(), options, &mut subtotal);
                WalkSignal::Continue
            }
        },
    });

    subtotal
}

/// Resolve, open and count one file, folding the result into `subtotal`.
fn count_leaf(path: &Path, options: &CountOptions, subtotal: &mut Subtotal) {
    let path = match resolve_absolute(path) {
        Ok(path) => path,
        Err(e) => {
            report(subtotal, Skip::new(path, SkipStage::Resolve, e));
            return;
        }
    };

    let result = match File::open(&path) {
        Ok(mut file) => count_lines_with_buffer(&mut file, options.buffer_size),
        Err(e) => {
            report(subtotal, Skip::new(&path, SkipStage::Open, e));
            return;
        }
    };

    fold_count(subtotal, path, result, options);
}

/// Fold one file's count into `subtotal`.
///
/// A read failure is reported and still contributes the lines counted
/// before it.
fn fold_count(
    subtotal: &mut Subtotal,
    path: PathBuf,
    result: Result<u64, CountError>,
    options: &CountOptions,
) {
    let lines = match result {
        Ok(lines) => lines,
        Err(e) => {
            report(subtotal, Skip::new(&path, SkipStage::Read, &e.source));
            e.partial
        }
    };

    debug!(path = %path.display(), lines, "counted");
    subtotal.add_file(lines);
    if options.keep_files {
        subtotal.file_counts.push(FileCount { path, lines });
    }
}

fn report(subtotal: &mut Subtotal, skip: Skip) {
    warn!(
        path = %skip.path.display(),
        error = %skip.message,
        "{}",
        skip.stage.describe()
    );
    subtotal.skip(skip);
}

fn log_subtotal(strategy: &str, subtotal: &Subtotal) {
    info!(
        strategy,
        lines = subtotal.lines,
        files = subtotal.files,
        skipped = subtotal.skipped.len(),
        "strategy finished"
    );
}
