//! Error types for linesumlib

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input list a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Directory scanned without recursion (`--dir`)
    Dir,
    /// Directory walked recursively (`--rdir`)
    RecDir,
    /// Single file (`--file`)
    File,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = match self {
            InputKind::Dir => "--dir",
            InputKind::RecDir => "--rdir",
            InputKind::File => "--file",
        };
        f.write_str(flag)
    }
}

/// Why an input value failed pre-flight validation.
#[derive(Error, Debug)]
pub enum InvalidReason {
    /// The absolute path could not be computed
    #[error("could not resolve absolute path: {0}")]
    Unresolvable(#[source] std::io::Error),

    /// Nothing exists at the path
    #[error("path does not exist")]
    NotFound,

    /// The path exists but could not be inspected
    #[error("could not inspect path: {0}")]
    Inaccessible(#[source] std::io::Error),

    /// A directory was expected
    #[error("not a directory")]
    NotADirectory,

    /// A file was expected
    #[error("is a directory, not a file")]
    IsADirectory,
}

/// Fatal errors. These abort a run before any counting happens.
#[derive(Error, Debug)]
pub enum LinesumError {
    /// An input value failed validation
    #[error("invalid {kind} value '{value}' at index {index}: {reason}")]
    InvalidInput {
        kind: InputKind,
        index: usize,
        value: String,
        path: PathBuf,
        #[source]
        reason: InvalidReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_value_and_index() {
        let err = LinesumError::InvalidInput {
            kind: InputKind::File,
            index: 2,
            value: "missing.txt".to_string(),
            path: PathBuf::from("/tmp/missing.txt"),
            reason: InvalidReason::NotFound,
        };

        let msg = err.to_string();
        assert_eq!(
            msg,
            "invalid --file value 'missing.txt' at index 2: path does not exist"
        );
    }

    #[test]
    fn test_input_kind_display() {
        assert_eq!(InputKind::Dir.to_string(), "--dir");
        assert_eq!(InputKind::RecDir.to_string(), "--rdir");
        assert_eq!(InputKind::File.to_string(), "--file");
    }
}
