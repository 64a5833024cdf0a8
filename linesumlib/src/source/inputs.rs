//! Input lists and pre-flight validation.
//!
//! An [`InputSpec`] holds the three raw lists the user supplied. Counting
//! only accepts a [`ValidatedInputs`], and the only way to get one is
//! [`InputSpec::validate`]. That makes "validate before counting" a property
//! of the types rather than of call order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{InputKind, InvalidReason, LinesumError};
use crate::Result;

/// Resolve `path` against the current working directory.
///
/// Symlinks are not resolved and the path does not have to exist.
pub fn resolve_absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    std::path::absolute(path)
}

/// The three raw input lists, trimmed but not yet checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSpec {
    /// Single files (`--file`)
    pub files: Vec<String>,
    /// Directories scanned without recursion (`--dir`)
    pub dirs: Vec<String>,
    /// Directories walked recursively (`--rdir`)
    pub rec_dirs: Vec<String>,
}

impl InputSpec {
    /// Create an empty input spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add files to count.
    pub fn files<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.files.extend(trimmed(values));
        self
    }

    /// Add directories to scan without recursion.
    pub fn dirs<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dirs.extend(trimmed(values));
        self
    }

    /// Add directories to walk recursively.
    pub fn rec_dirs<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rec_dirs.extend(trimmed(values));
        self
    }

    /// True when no inputs were given at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty() && self.rec_dirs.is_empty()
    }

    /// Check every input and stop at the first failure.
    ///
    /// Flat directories are checked first, then recursive directories, then
    /// files. Each list is checked in order. A directory entry must exist
    /// and be a directory. A file entry must exist and must not be a
    /// directory.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linesumlib::InputSpec;
    /// use tempfile::tempdir;
    ///
    /// let dir = tempdir().unwrap();
    /// let dir_str = dir.path().to_str().unwrap();
    ///
    /// assert!(InputSpec::new().dirs([dir_str]).validate().is_ok());
    /// // A directory is not accepted where a file is expected
    /// assert!(InputSpec::new().files([dir_str]).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ValidatedInputs> {
        for (index, value) in self.dirs.iter().enumerate() {
            check_input(InputKind::Dir, index, value)?;
        }
        for (index, value) in self.rec_dirs.iter().enumerate() {
            check_input(InputKind::RecDir, index, value)?;
        }
        for (index, value) in self.files.iter().enumerate() {
            check_input(InputKind::File, index, value)?;
        }

        Ok(ValidatedInputs {
            files: self.files.iter().map(PathBuf::from).collect(),
            dirs: self.dirs.iter().map(PathBuf::from).collect(),
            rec_dirs: self.rec_dirs.iter().map(PathBuf::from).collect(),
        })
    }
}

fn trimmed<I, S>(values: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|v| v.as_ref().trim().to_string())
}

/// Inputs that passed [`InputSpec::validate`].
///
/// The paths are stored as the user typed them. Each strategy resolves
/// them again right before it touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
    rec_dirs: Vec<PathBuf>,
}

impl ValidatedInputs {
    /// Files to count.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Directories to scan without recursion.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Directories to walk recursively.
    pub fn rec_dirs(&self) -> &[PathBuf] {
        &self.rec_dirs
    }
}

fn check_input(kind: InputKind, index: usize, value: &str) -> Result<()> {
    let invalid = |path: PathBuf, reason: InvalidReason| LinesumError::InvalidInput {
        kind,
        index,
        value: value.to_string(),
        path,
        reason,
    };

    let path = resolve_absolute(value)
        .map_err(|e| invalid(PathBuf::from(value), InvalidReason::Unresolvable(e)))?;

    let meta = match fs::metadata(&path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(invalid(path, InvalidReason::NotFound))
        }
        Err(e) => return Err(invalid(path, InvalidReason::Inaccessible(e))),
    };

    match kind {
        InputKind::Dir | InputKind::RecDir if !meta.is_dir() => {
            Err(invalid(path, InvalidReason::NotADirectory))
        }
        InputKind::File if meta.is_dir() => Err(invalid(path, InvalidReason::IsADirectory)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn path_str(p: &Path) -> String {
        p.to_string_lossy().to_string()
    }

    #[test]
    fn test_values_are_trimmed() {
        let spec = InputSpec::new()
            .files(["  a.txt ", "\tb.txt"])
            .dirs([" src"])
            .rec_dirs(["lib  "]);

        assert_eq!(spec.files, vec!["a.txt", "b.txt"]);
        assert_eq!(spec.dirs, vec!["src"]);
        assert_eq!(spec.rec_dirs, vec!["lib"]);
    }

    #[test]
    fn test_empty_spec_is_valid() {
        let spec = InputSpec::new();
        assert!(spec.is_empty());

        let validated = spec.validate().unwrap();
        assert!(validated.files().is_empty());
        assert!(validated.dirs().is_empty());
        assert!(validated.rec_dirs().is_empty());
    }

    #[test]
    fn test_valid_inputs_keep_order_and_duplicates() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("x.txt");
        fs::write(&file, "1\n").unwrap();

        let spec = InputSpec::new()
            .files([path_str(&file), path_str(&file)])
            .dirs([path_str(temp.path())])
            .rec_dirs([path_str(temp.path())]);

        let validated = spec.validate().unwrap();
        assert_eq!(validated.files(), &[file.clone(), file]);
        assert_eq!(validated.dirs().len(), 1);
        assert_eq!(validated.rec_dirs().len(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.txt");

        let err = InputSpec::new()
            .files([path_str(&missing)])
            .validate()
            .unwrap_err();

        match err {
            LinesumError::InvalidInput {
                kind,
                index,
                reason: InvalidReason::NotFound,
                ..
            } => {
                assert_eq!(kind, InputKind::File);
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_directory_given_as_file_is_fatal() {
        let temp = tempdir().unwrap();

        let err = InputSpec::new()
            .files([path_str(temp.path())])
            .validate()
            .unwrap_err();

        assert!(matches!(
            err,
            LinesumError::InvalidInput {
                reason: InvalidReason::IsADirectory,
                ..
            }
        ));
    }

    #[test]
    fn test_file_given_as_dir_is_fatal() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("x.txt");
        fs::write(&file, "").unwrap();

        for spec in [
            InputSpec::new().dirs([path_str(&file)]),
            InputSpec::new().rec_dirs([path_str(&file)]),
        ] {
            let err = spec.validate().unwrap_err();
            assert!(matches!(
                err,
                LinesumError::InvalidInput {
                    reason: InvalidReason::NotADirectory,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_reports_position_of_offending_value() {
        let temp = tempdir().unwrap();
        let ok = path_str(temp.path());
        let bad = path_str(&temp.path().join("nope"));

        let err = InputSpec::new()
            .rec_dirs([ok.clone(), ok, bad.clone()])
            .validate()
            .unwrap_err();

        let LinesumError::InvalidInput {
            kind, index, value, ..
        } = err;
        assert_eq!(kind, InputKind::RecDir);
        assert_eq!(index, 2);
        assert_eq!(value, bad);
    }

    #[test]
    fn test_dirs_are_checked_before_files() {
        let temp = tempdir().unwrap();
        let bad_dir = path_str(&temp.path().join("no-dir"));
        let bad_file = path_str(&temp.path().join("no-file"));

        let err = InputSpec::new()
            .files([bad_file])
            .dirs([bad_dir])
            .validate()
            .unwrap_err();

        assert!(matches!(
            err,
            LinesumError::InvalidInput {
                kind: InputKind::Dir,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_value_cannot_be_resolved() {
        let err = InputSpec::new().files(["   "]).validate().unwrap_err();
        assert!(matches!(
            err,
            LinesumError::InvalidInput {
                reason: InvalidReason::Unresolvable(_),
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_absolute_keeps_absolute_paths() {
        let temp = tempdir().unwrap();
        let resolved = resolve_absolute(temp.path()).unwrap();
        assert_eq!(resolved, temp.path());
    }

    #[test]
    fn test_resolve_absolute_joins_relative_onto_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve_absolute("some/relative.txt").unwrap();
        assert_eq!(resolved, cwd.join("some/relative.txt"));
    }
}
