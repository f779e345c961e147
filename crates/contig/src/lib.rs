//! An allocator-aware contiguous growable array.
//!
//! [`Array<T, S>`] stores a sequence of `T` in one contiguously
//! allocated buffer obtained from a [`Store`], growing the buffer as
//! elements are appended. It is the familiar vector shape with two
//! deliberate emphases:
//!
//! - **Pluggable storage.** Every byte the container owns comes from a
//!   [`Store`] value held inside the container. The default is
//!   [`Global`] (the process allocator); tests swap in counting or
//!   quota-limited stores.
//! - **Strong failure safety.** Growth never touches the old buffer
//!   until the new one is fully populated, and every path that clones
//!   elements (`from_elem`, `clone_from`, the `assign` family) builds
//!   its replacement to completion before releasing prior state. A
//!   panicking `Clone` or an exhausted store leaves the container in
//!   its documented previous state with nothing leaked.
//!
//! # Architecture
//!
//! ```text
//! Array<T, S>                 length + buffer
//! ├── RawBuf<T, S>            owned, size-tagged block of raw slots
//! │   └── S: Store            fallible allocate / deallocate
//! ├── Iter / IterMut          borrowing cursors over the live prefix
//! └── IntoIter                owning cursor, frees the block on drop
//! ```
//!
//! Slots `[0, len)` always hold live values; slots `[len, capacity)`
//! are raw memory that never holds a live value. The container is the
//! sole owner of its buffer — clones allocate and deep-copy, moves
//! transfer the block.
//!
//! # Quick start
//!
//! ```rust
//! use contig::{array, Array};
//!
//! let mut a = array![1, 2, 3];
//! a.reserve(10);
//! a.push(4);
//! assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
//! assert!(a.capacity() >= 10);
//!
//! let b = a.clone();
//! a[0] = 9;
//! assert_eq!(b[0], 1); // deep copy
//! ```
//!
//! # Unsafe code
//!
//! This crate contains the workspace's bounded `unsafe`: raw-slot
//! construction and destruction in `array`, block bookkeeping in `raw`,
//! and cursor reads in `iter`/`into_iter`. Every unsafe block carries a
//! `// SAFETY:` comment stating the invariant it relies on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
pub mod error;
pub mod into_iter;
pub mod iter;
mod macros;
mod raw;

pub use array::Array;
pub use error::ReserveError;
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};

// The store seam, re-exported so `contig` is a one-dependency crate
// for most users.
pub use contig_store::{Global, Store, StoreError};
