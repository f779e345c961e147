//! Test stores and fixture types for `contig` development.
//!
//! - [`CountingStore`]: forwards to [`Global`] while tracking
//!   outstanding blocks and bytes, so tests can assert that every
//!   allocation is paired with a release and that the default
//!   constructor never touches the store.
//! - [`QuotaStore`]: fails deterministically after a configured number
//!   of allocations, for exercising the error paths.
//! - [`Brittle`]: a clone-counting value whose `clone` panics on a
//!   chosen call, plus a live-instance count for leak and double-drop
//!   detection in panic-safety tests.
//!
//! All shared state sits behind `Arc`, so clones of a store observe
//! one ledger — matching the store contract that clones are handles to
//! the same memory source.

#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Arc;

use contig_store::{Global, Store, StoreError};

/// A [`Store`] that forwards to [`Global`] and keeps books.
///
/// The ledger is shared across clones. Dropping the container (and any
/// iterators that took its buffer) must return the ledger to balance.
#[derive(Clone, Default)]
pub struct CountingStore {
    ledger: Arc<Ledger>,
}

#[derive(Default)]
struct Ledger {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    outstanding_bytes: AtomicIsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of `allocate` calls observed.
    pub fn allocations(&self) -> usize {
        self.ledger.allocations.load(Ordering::Relaxed)
    }

    /// Total number of `deallocate` calls observed.
    pub fn deallocations(&self) -> usize {
        self.ledger.deallocations.load(Ordering::Relaxed)
    }

    /// Bytes currently allocated and not yet released.
    pub fn outstanding_bytes(&self) -> isize {
        self.ledger.outstanding_bytes.load(Ordering::Relaxed)
    }

    /// True when every allocation has been released.
    pub fn is_balanced(&self) -> bool {
        self.outstanding_bytes() == 0 && self.allocations() == self.deallocations()
    }
}

impl Store for CountingStore {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, StoreError> {
        let ptr = Global.allocate(layout)?;
        self.ledger.allocations.fetch_add(1, Ordering::Relaxed);
        self.ledger
            .outstanding_bytes
            .fetch_add(layout.size() as isize, Ordering::Relaxed);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.ledger.deallocations.fetch_add(1, Ordering::Relaxed);
        self.ledger
            .outstanding_bytes
            .fetch_sub(layout.size() as isize, Ordering::Relaxed);
        // SAFETY: forwarded verbatim; the caller's contract is ours.
        unsafe { Global.deallocate(ptr, layout) };
    }
}

/// A [`Store`] with an allocation budget.
///
/// The first `budget` `allocate` calls succeed (through [`Global`]);
/// every later call reports [`StoreError::Exhausted`]. Deallocation is
/// always honored, so a container can still wind down cleanly.
#[derive(Clone)]
pub struct QuotaStore {
    remaining: Arc<AtomicIsize>,
}

impl QuotaStore {
    pub fn new(budget: usize) -> Self {
        Self {
            remaining: Arc::new(AtomicIsize::new(budget as isize)),
        }
    }

    /// Allocations left before the store starts failing.
    pub fn remaining(&self) -> isize {
        self.remaining.load(Ordering::Relaxed).max(0)
    }
}

impl Store for QuotaStore {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, StoreError> {
        if self.remaining.fetch_sub(1, Ordering::Relaxed) <= 0 {
            return Err(StoreError::Exhausted {
                bytes: layout.size(),
            });
        }
        Global.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded verbatim; the caller's contract is ours.
        unsafe { Global.deallocate(ptr, layout) };
    }
}

/// Shared fuse and accounting for a family of [`Brittle`] values.
#[derive(Default)]
pub struct BrittleFuse {
    clones_made: AtomicUsize,
    live: AtomicIsize,
    /// Clone call (1-based) that panics; 0 disables the fuse.
    fail_on_clone: AtomicUsize,
}

impl BrittleFuse {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Arm the fuse: the `n`th clone call (1-based) will panic.
    pub fn fail_on_clone(self: &Arc<Self>, n: usize) {
        self.fail_on_clone.store(n, Ordering::Relaxed);
    }

    /// Number of values currently alive (created minus dropped).
    pub fn live(&self) -> isize {
        self.live.load(Ordering::Relaxed)
    }

    /// Number of clone calls made so far, panicking ones included.
    pub fn clones_made(&self) -> usize {
        self.clones_made.load(Ordering::Relaxed)
    }
}

/// A value whose `clone` panics on a chosen call.
///
/// Every construction and drop is tallied on the shared fuse, so a
/// test can assert that after a panic unwound through container code,
/// exactly the expected number of values remain alive — no leaks, no
/// double drops.
pub struct Brittle {
    pub id: u32,
    fuse: Arc<BrittleFuse>,
}

impl Brittle {
    pub fn new(id: u32, fuse: &Arc<BrittleFuse>) -> Self {
        fuse.live.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            fuse: Arc::clone(fuse),
        }
    }
}

impl Clone for Brittle {
    fn clone(&self) -> Self {
        let nth = self.fuse.clones_made.fetch_add(1, Ordering::Relaxed) + 1;
        let fail_on = self.fuse.fail_on_clone.load(Ordering::Relaxed);
        if fail_on != 0 && nth >= fail_on {
            panic!("brittle clone #{nth} failed as armed");
        }
        Self::new(self.id, &self.fuse)
    }
}

impl Drop for Brittle {
    fn drop(&mut self) {
        self.fuse.live.fetch_sub(1, Ordering::Relaxed);
    }
}

impl PartialEq for Brittle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::fmt::Debug for Brittle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Brittle").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_store_balances_on_round_trip() {
        let store = CountingStore::new();
        let layout = Layout::array::<u64>(8).unwrap();
        let ptr = store.allocate(layout).unwrap();
        assert_eq!(store.allocations(), 1);
        assert_eq!(store.outstanding_bytes(), 64);
        // SAFETY: ptr is live with the matching layout.
        unsafe { store.deallocate(ptr, layout) };
        assert!(store.is_balanced());
    }

    #[test]
    fn counting_store_clones_share_the_ledger() {
        let store = CountingStore::new();
        let clone = store.clone();
        let layout = Layout::array::<u8>(16).unwrap();
        let ptr = clone.allocate(layout).unwrap();
        assert_eq!(store.allocations(), 1);
        // SAFETY: ptr is live with the matching layout.
        unsafe { store.deallocate(ptr, layout) };
        assert!(clone.is_balanced());
    }

    #[test]
    fn quota_store_fails_after_budget() {
        let store = QuotaStore::new(1);
        let layout = Layout::array::<u32>(4).unwrap();
        let ptr = store.allocate(layout).unwrap();
        assert!(matches!(
            store.allocate(layout),
            Err(StoreError::Exhausted { .. })
        ));
        // SAFETY: ptr is live with the matching layout.
        unsafe { store.deallocate(ptr, layout) };
    }

    #[test]
    fn brittle_fuse_panics_on_the_armed_clone() {
        let fuse = BrittleFuse::new();
        fuse.fail_on_clone(2);
        let original = Brittle::new(1, &fuse);
        let first = original.clone();
        assert_eq!(fuse.live(), 2);
        let result = std::panic::catch_unwind(|| original.clone());
        assert!(result.is_err());
        drop(first);
        drop(original);
        assert_eq!(fuse.live(), 0);
    }
}
