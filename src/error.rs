use std::fmt;

/// Errors returned by the mutating operations of [`RbTree`](crate::RbTree).
///
/// Both leave the tree exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// `insert` was given a key that is already present.
    DuplicateKey,
    /// `delete` was given a key that is not present.
    KeyNotFound,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::DuplicateKey => write!(f, "Key already present"),
            TreeError::KeyNotFound => write!(f, "Key not found"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result type alias used by the tree's mutating operations.
pub type Result<T> = std::result::Result<T, TreeError>;
