//! Raw storage providers for the `contig` container.
//!
//! This is the leaf crate of the workspace. It defines the [`Store`]
//! trait — the seam through which the container obtains and releases
//! raw, untyped, unconstructed memory — plus the [`Global`] store
//! backed by the process allocator and the [`StoreError`] failure type.
//!
//! A store hands out blocks described by [`core::alloc::Layout`] and
//! never interprets their contents: element construction and
//! destruction are entirely the container's business. Stores are plain
//! values — cheaply cloneable, held by value inside the container, and
//! never exchanged between live containers.
//!
//! Allocation is fallible by design: [`Store::allocate`] returns a
//! `Result` rather than aborting, so callers can surface exhaustion to
//! their own callers or exercise failure paths with a quota-limited
//! test store.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod global;
pub mod traits;

pub use error::StoreError;
pub use global::Global;
pub use traits::Store;
