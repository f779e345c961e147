//! Container-specific error types.

use std::error::Error;
use std::fmt;

use contig_store::StoreError;

/// Errors that can occur while growing or building a container.
///
/// Returned by the `try_` operations ([`Array::try_reserve`],
/// [`Array::try_push`], [`Array::try_with_capacity_in`]); the
/// infallible twins panic on these instead.
///
/// [`Array::try_reserve`]: crate::Array::try_reserve
/// [`Array::try_push`]: crate::Array::try_push
/// [`Array::try_with_capacity_in`]: crate::Array::try_with_capacity_in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReserveError {
    /// The requested capacity exceeds what a single allocation can
    /// address. Raised before the store is consulted.
    CapacityOverflow {
        /// Number of element slots requested.
        elements: usize,
    },
    /// The store could not supply the requested block.
    Store(StoreError),
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { elements } => {
                write!(f, "capacity overflow: {elements} elements exceed the addressable limit")
            }
            Self::Store(err) => write!(f, "allocation failed: {err}"),
        }
    }
}

impl Error for ReserveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CapacityOverflow { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ReserveError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
