//! Store-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur when requesting memory from a [`Store`].
///
/// [`Store`]: crate::Store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not supply the requested block.
    Exhausted {
        /// Number of bytes requested.
        bytes: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { bytes } => {
                write!(f, "store exhausted: requested {bytes} bytes")
            }
        }
    }
}

impl Error for StoreError {}
