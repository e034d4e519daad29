//! Error types for Linvis

use serde::Serialize;
use thiserror::Error;

/// Recoverable failures reported by the containers themselves.
///
/// A container that returns one of these has not been modified.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContainerError {
    #[error("{op} failed: index {index} out of bounds (size {len})")]
    OutOfBounds {
        op: &'static str,
        index: i64,
        len: usize,
    },

    #[error("{op} failed: container is empty")]
    Empty { op: &'static str },
}

impl ContainerError {
    pub(crate) fn out_of_bounds(op: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfBounds {
            op,
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }
}

#[derive(Error, Debug)]
pub enum LinvisError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("{op} is not supported by {kind} structures")]
    UnsupportedOperation { op: String, kind: String },

    #[error("Structure '{0}' does not exist")]
    UnknownStructure(String),

    #[error("Structure '{0}' already exists")]
    DuplicateStructure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Container(#[from] ContainerError),
}

pub type Result<T> = std::result::Result<T, LinvisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = ContainerError::out_of_bounds("insert", 5, 2);
        assert_eq!(
            err.to_string(),
            "insert failed: index 5 out of bounds (size 2)"
        );
    }

    #[test]
    fn test_container_error_converts() {
        let err: LinvisError = ContainerError::Empty { op: "pop" }.into();
        assert_eq!(err.to_string(), "pop failed: container is empty");
    }
}
