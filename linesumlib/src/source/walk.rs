//! Directory enumeration.
//!
//! Two ways to find candidate files:
//!
//! - [`list_flat`]: the immediate entries of one directory, sorted by name
//! - [`walk_tree`]: a depth-first walk driven by a visitor that returns a
//!   [`WalkSignal`] for every entry or error it is shown

use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// What the walk should do after the visitor has seen an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkSignal {
    /// Keep going, descending into the entry if it is a directory
    Continue,
    /// Leave this entry alone and move on to the next one. A directory
    /// skipped this way is not descended into either.
    SkipEntry,
    /// Do not descend into this directory
    SkipSubtree,
}

/// One step of a recursive walk, as seen by the visitor.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    /// A directory entry (the root itself is reported at depth 0)
    Entry(&'a DirEntry),
    /// The walk could not read something
    Error(&'a walkdir::Error),
}

/// Rough classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directories, never opened themselves
    Dir,
    /// Regular files and symlinks; both are opened and read
    File,
    /// FIFOs, sockets and device nodes
    Special,
}

impl EntryKind {
    /// Classify a file type as reported without following symlinks.
    pub fn of(file_type: FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() || file_type.is_symlink() {
            EntryKind::File
        } else {
            EntryKind::Special
        }
    }
}

/// An immediate child of a flat-scanned directory.
#[derive(Debug)]
pub struct FlatEntry {
    /// `dir` joined with the entry name
    pub path: PathBuf,
    /// The entry type, or the error from asking for it
    pub kind: io::Result<EntryKind>,
}

/// List the immediate entries of `dir`, sorted by file name.
///
/// Fails only if the directory itself cannot be read. Per-entry errors are
/// returned inside the list so the caller can skip just those entries.
pub fn list_flat(dir: &Path) -> io::Result<Vec<io::Result<FlatEntry>>> {
    let mut entries: Vec<io::Result<FlatEntry>> = fs::read_dir(dir)?
        .map(|entry| {
            entry.map(|e| FlatEntry {
                path: dir.join(e.file_name()),
                kind: e.file_type().map(EntryKind::of),
            })
        })
        .collect();

    entries.sort_by(|a, b| match (a, b) {
        (Ok(a), Ok(b)) => a.path.cmp(&b.path),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });

    Ok(entries)
}

/// Walk `root` depth-first in file-name order, calling `visit` for every
/// entry and every error.
///
/// Symlinks below the root are not followed. For a directory entry,
/// returning anything but [`WalkSignal::Continue`] prunes everything
/// beneath it. An error that comes from a directory that could not be
/// opened already means nothing beneath it will be visited, so the signal
/// returned for an error does not change the walk.
pub fn walk_tree<F>(root: &Path, mut visit: F)
where
    F: FnMut(WalkEvent<'_>) -> WalkSignal,
{
    let mut it = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(next) = it.next() {
        match next {
            Ok(entry) => {
                let signal = visit(WalkEvent::Entry(&entry));
                if signal != WalkSignal::Continue && entry.file_type().is_dir() {
                    it.skip_current_dir();
                }
            }
            Err(err) => {
                visit(WalkEvent::Error(&err));
            }
        }
    }
}

/// True if a walk error means the walk was refused entry to a directory.
pub fn is_permission_denied_dir(err: &walkdir::Error) -> bool {
    denied_dir(err.io_error(), err.path())
}

fn denied_dir(io_error: Option<&io::Error>, path: Option<&Path>) -> bool {
    let denied = io_error.is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied);
    denied && path.is_some_and(Path::is_dir)
}
