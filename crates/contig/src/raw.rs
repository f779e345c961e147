//! The owned, size-tagged buffer handle behind [`Array`].
//!
//! [`RawBuf`] owns one block of raw element slots obtained from a
//! [`Store`] and knows nothing about element lifecycles: it never
//! constructs or drops a `T`. The container layers the live-prefix
//! discipline on top. Keeping the two concerns apart means buffer
//! release on unwind is handled here, by `Drop`, no matter which
//! container operation panicked.
//!
//! Conventions shared with the ecosystem's growable arrays:
//!
//! - capacity 0 ⇔ no block: the pointer is dangling and the store has
//!   not been consulted;
//! - zero-sized `T` never allocates and reports unbounded capacity.
//!
//! [`Array`]: crate::Array

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

use contig_store::Store;

use crate::error::ReserveError;

/// An exclusively owned block of `cap` raw slots of `T`.
///
/// No slot is assumed initialized. The handle releases the block to
/// its store on drop; the store travels with the handle (moved on
/// move, never shared between two live handles).
pub(crate) struct RawBuf<T, S: Store> {
    ptr: NonNull<T>,
    cap: usize,
    store: S,
    _marker: PhantomData<T>,
}

impl<T, S: Store> RawBuf<T, S> {
    /// An empty handle: dangling pointer, no block, store untouched.
    pub(crate) const fn new_in(store: S) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            store,
            _marker: PhantomData,
        }
    }

    /// Allocate a block of exactly `cap` slots.
    ///
    /// `cap == 0` and zero-sized `T` produce an empty handle without
    /// consulting the store.
    pub(crate) fn try_allocate_in(cap: usize, store: S) -> Result<Self, ReserveError> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Ok(Self::new_in(store));
        }
        let layout = Self::layout_for(cap)?;
        let block = store.allocate(layout)?;
        Ok(Self {
            ptr: block.cast(),
            cap,
            store,
            _marker: PhantomData,
        })
    }

    /// Slot count of the current block.
    ///
    /// Zero-sized `T` reports `usize::MAX`: any number of values fits
    /// in no storage.
    pub(crate) fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Base pointer of the block. Dangling (but aligned) when
    /// `capacity() == 0` or `T` is zero-sized.
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The store this handle allocates through.
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Replace the block with one of exactly `new_cap` slots, migrating
    /// the first `used` slots bitwise.
    ///
    /// The old block is not touched until the new one is fully
    /// populated, so a store failure leaves the handle unchanged.
    /// `new_cap == 0` releases the block and returns the handle to the
    /// empty state.
    ///
    /// # Safety
    ///
    /// `used <= min(self.capacity(), new_cap)` and the first `used`
    /// slots must be initialized. After the call they live in the new
    /// block; the caller's pointers into the old block are invalid.
    pub(crate) unsafe fn reallocate(
        &mut self,
        new_cap: usize,
        used: usize,
    ) -> Result<(), ReserveError> {
        debug_assert!(used <= new_cap);
        if mem::size_of::<T>() == 0 || new_cap == self.cap {
            return Ok(());
        }

        if new_cap == 0 {
            self.release();
            return Ok(());
        }

        let layout = Self::layout_for(new_cap)?;
        let block: NonNull<T> = self.store.allocate(layout)?.cast();
        // SAFETY: the new block holds at least `used` slots, the old
        // one holds the `used` initialized slots, and distinct blocks
        // cannot overlap.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), block.as_ptr(), used) };
        self.release();
        self.ptr = block;
        self.cap = new_cap;
        Ok(())
    }

    /// Hand the current block (if any) back to the store.
    ///
    /// Does not drop any elements — the container has already done so
    /// or has moved them out.
    fn release(&mut self) {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        // SAFETY: cap > 0, so this layout was computed and validated
        // when the block was allocated.
        let layout = unsafe {
            Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>())
        };
        // SAFETY: ptr came from this store with exactly this layout and
        // has not been released yet.
        unsafe { self.store.deallocate(self.ptr.cast(), layout) };
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn layout_for(cap: usize) -> Result<Layout, ReserveError> {
        Layout::array::<T>(cap).map_err(|_| ReserveError::CapacityOverflow { elements: cap })
    }
}

impl<T, S: Store> Drop for RawBuf<T, S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_store::Global;

    #[test]
    fn empty_handle_never_touches_the_store() {
        let buf: RawBuf<u64, Global> = RawBuf::new_in(Global);
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zero_capacity_allocation_is_empty() {
        let buf: RawBuf<u64, Global> = RawBuf::try_allocate_in(0, Global).unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn allocation_reports_exact_capacity() {
        let buf: RawBuf<u32, Global> = RawBuf::try_allocate_in(12, Global).unwrap();
        assert_eq!(buf.capacity(), 12);
    }

    #[test]
    fn zst_capacity_is_unbounded() {
        let buf: RawBuf<(), Global> = RawBuf::try_allocate_in(7, Global).unwrap();
        assert_eq!(buf.capacity(), usize::MAX);
    }

    #[test]
    fn reallocate_migrates_the_used_prefix() {
        let mut buf: RawBuf<u32, Global> = RawBuf::try_allocate_in(4, Global).unwrap();
        // SAFETY: slots 0..4 are in-bounds raw memory.
        unsafe {
            for i in 0..4 {
                buf.ptr().add(i).write(i as u32 * 10);
            }
            buf.reallocate(16, 4).unwrap();
            assert_eq!(buf.capacity(), 16);
            for i in 0..4 {
                assert_eq!(buf.ptr().add(i).read(), i as u32 * 10);
            }
        }
    }

    #[test]
    fn reallocate_to_zero_releases_the_block() {
        let mut buf: RawBuf<u32, Global> = RawBuf::try_allocate_in(4, Global).unwrap();
        // SAFETY: no slots are claimed as initialized.
        unsafe { buf.reallocate(0, 0).unwrap() };
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn layout_overflow_is_caught_before_the_store() {
        let result: Result<RawBuf<u64, Global>, _> =
            RawBuf::try_allocate_in(usize::MAX / 2, Global);
        assert!(matches!(
            result,
            Err(ReserveError::CapacityOverflow { .. })
        ));
    }
}
