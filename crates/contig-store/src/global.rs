//! The process-allocator store.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::StoreError;
use crate::traits::Store;

/// A [`Store`] backed by the process allocator (`std::alloc`).
///
/// This is the default store for the container. It is a zero-sized
/// handle: every clone refers to the same global allocator, so blocks
/// may be allocated and released through different clones freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl Store for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, StoreError> {
        debug_assert!(layout.size() > 0, "zero-size layouts never reach the store");
        // SAFETY: the container guarantees layout.size() > 0, which is
        // the only precondition of alloc.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or(StoreError::Exhausted {
            bytes: layout.size(),
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the caller guarantees ptr came from allocate on this
        // store with the same layout and has not been released yet.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
