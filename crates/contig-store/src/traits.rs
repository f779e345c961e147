//! The storage provider trait.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::StoreError;

/// A provider of raw, untyped memory blocks.
///
/// Implemented by [`Global`] for the process allocator and by the test
/// stores in `contig-testing`. The container calls through this trait
/// for every buffer it owns; it never assumes returned memory holds
/// valid values, and it destroys its own elements before handing a
/// block back.
///
/// # Contract
///
/// - `allocate` returns a block of at least `layout.size()` bytes with
///   the alignment `layout.align()`, or [`StoreError::Exhausted`]. It
///   is never called with a zero-size layout.
/// - Every successful `allocate` is paired with exactly one
///   `deallocate` of the same layout. A store is never asked to release
///   a block it did not issue.
/// - Stores are plain values: `Clone` must produce a handle to the same
///   underlying memory source, so that a block allocated through one
///   clone may be released through another. A container clones its
///   store when it is itself cloned and carries it along on move;
///   stores are never swapped between live containers.
///
/// [`Global`]: crate::Global
pub trait Store: Clone {
    /// Allocate a block for the given layout.
    ///
    /// The block's contents are uninitialized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Exhausted`] if the block cannot be
    /// supplied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, StoreError>;

    /// Release a previously allocated block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`allocate`](Store::allocate)
    /// on this store (or a clone of it) with the same `layout`, and
    /// must not have been released already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}
