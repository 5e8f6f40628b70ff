use std::error;
use std::fmt;
use std::result;

/// Errors returned by treap operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The requested key does not exist in the treap.
    NotFound,
    /// The operation needs at least one node, but the treap is empty.
    EmptyTreap,
    /// A rotation was requested on a node that has no parent, or that is not on the side of its
    /// parent the rotation expects. Never produced through the public API.
    InvalidRotation,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not found"),
            Error::EmptyTreap => write!(f, "treap is empty"),
            Error::InvalidRotation => write!(f, "invalid rotation"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
