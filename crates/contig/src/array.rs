//! The contiguous growable array.
//!
//! [`Array`] owns one contiguously allocated buffer of element slots
//! and keeps the first `len` of them initialized. All memory comes
//! from the [`Store`] held inside the container; growth allocates a
//! fresh block, migrates the live prefix bitwise, and only then
//! releases the old block, so a failed growth leaves the container
//! untouched.
//!
//! Paths that clone elements (`from_elem`, `Clone`, `clone_from`, the
//! `assign` family, `extend`) build into a fresh container and let its
//! `Drop` unwind any partially built state if a clone panics. The
//! assignment paths then swap the finished replacement into place, so
//! the destination keeps its previous contents on failure.

use core::cmp;
use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice::{self, SliceIndex};

use contig_store::{Global, Store};

use crate::error::ReserveError;
use crate::into_iter::IntoIter;
use crate::iter::{Iter, IterMut};
use crate::raw::RawBuf;

/// Smallest capacity a growth step will allocate.
///
/// Keeps the first few appends from reallocating one slot at a time.
const MIN_NON_ZERO_CAP: usize = 4;

/// A contiguous growable array backed by a pluggable [`Store`].
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are raw
/// memory. An empty container holds no store-issued block at all.
///
/// The store is held by value: it is cloned when the container is
/// cloned, travels with the container on move, and is never exchanged
/// between live containers. This is a published contract, not an
/// implementation detail.
///
/// Dereferences to `[T]`, so the whole slice API (`get`, `first`,
/// `last`, indexing, sorting, …) applies to the live prefix.
///
/// # Examples
///
/// ```rust
/// use contig::Array;
///
/// let mut a: Array<i32> = Array::new();
/// assert_eq!(a.capacity(), 0); // no allocation yet
/// a.push(1);
/// a.push(2);
/// assert_eq!(a.last(), Some(&2));
/// ```
pub struct Array<T, S: Store = Global> {
    buf: RawBuf<T, S>,
    len: usize,
}

impl<T> Array<T, Global> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty array with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity_in(capacity, Global) {
            Ok(array) => array,
            Err(err) => panic!("with_capacity failed: {err}"),
        }
    }

    /// An array of `count` clones of `value`.
    ///
    /// Equivalent to the `array![value; count]` macro form. If a clone
    /// panics, everything built so far is dropped and the block is
    /// released before the panic continues.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated, or propagates a panic
    /// from `T::clone`.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global)
    }
}

impl<T, S: Store> Array<T, S> {
    /// An empty array that will allocate through `store`.
    ///
    /// Does not call the store.
    pub const fn new_in(store: S) -> Self {
        Self {
            buf: RawBuf::new_in(store),
            len: 0,
        }
    }

    /// An empty array with room for `capacity` elements in `store`.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if the capacity is unaddressable or the
    /// store is exhausted.
    pub fn try_with_capacity_in(capacity: usize, store: S) -> Result<Self, ReserveError> {
        Ok(Self {
            buf: RawBuf::try_allocate_in(capacity, store)?,
            len: 0,
        })
    }

    /// An array of `count` clones of `value`, allocated through `store`.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated, or propagates a panic
    /// from `T::clone`.
    pub fn from_elem_in(count: usize, value: T, store: S) -> Self
    where
        T: Clone,
    {
        let mut array = match Self::try_with_capacity_in(count, store) {
            Ok(array) => array,
            Err(err) => panic!("from_elem failed: {err}"),
        };
        if count == 0 {
            return array;
        }
        for _ in 0..count - 1 {
            array.push_within_capacity(value.clone());
        }
        // The final slot takes the original, saving one clone.
        array.push_within_capacity(value);
        array
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` iff there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current block can hold before the next
    /// growth. Unbounded (`usize::MAX`) for zero-sized element types.
    /// Never exceeds [`Self::max_capacity`].
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest capacity any array of `T` can reach: the number of
    /// slots that fit in `isize::MAX` bytes, or `usize::MAX` for
    /// zero-sized element types. Requests beyond this fail with
    /// [`ReserveError::CapacityOverflow`] before the store is
    /// consulted.
    pub fn max_capacity() -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            isize::MAX as usize / mem::size_of::<T>()
        }
    }

    /// The store this array allocates through.
    pub fn store(&self) -> &S {
        self.buf.store()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized and the block outlives
        // the borrow.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for as_slice, plus the borrow is exclusive.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Base pointer of the buffer. Dangling (but aligned) when no block
    /// is held; never null.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable base pointer of the buffer.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// A forward cursor over the live elements.
    ///
    /// Reverse traversal is `iter().rev()`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.as_slice())
    }

    /// A forward cursor yielding exclusive references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.as_mut_slice())
    }

    /// Ensure the capacity is at least `min_capacity`.
    ///
    /// No-op when already satisfied. Otherwise allocates a block of
    /// exactly `min_capacity` slots and migrates the live elements;
    /// the old block is untouched until migration is complete, so on
    /// error the array is exactly as it was. Any outstanding raw
    /// pointers into the buffer are invalidated on success.
    ///
    /// Note the argument is an absolute bound, not an additional count.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if the capacity is unaddressable or the
    /// store is exhausted.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), ReserveError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }
        // SAFETY: len <= capacity < min_capacity and slots [0, len) are
        // initialized.
        unsafe { self.buf.reallocate(min_capacity, self.len) }
    }

    /// Ensure the capacity is at least `min_capacity`.
    ///
    /// # Panics
    ///
    /// Panics where [`try_reserve`](Self::try_reserve) would return an
    /// error.
    pub fn reserve(&mut self, min_capacity: usize) {
        if let Err(err) = self.try_reserve(min_capacity) {
            panic!("reserve failed: {err}");
        }
    }

    /// Reduce the capacity to exactly the live count.
    ///
    /// Releases the block entirely when the array is empty. No-op when
    /// capacity already equals the live count.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot supply the smaller block.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }
        // SAFETY: exactly the initialized prefix is migrated.
        if let Err(err) = unsafe { self.buf.reallocate(self.len, self.len) } {
            panic!("shrink_to_fit failed: {err}");
        }
    }

    /// Drop all live elements, keeping the block.
    ///
    /// Elements are dropped in index order.
    pub fn clear(&mut self) {
        let live = self.len;
        // Length goes to zero first: if an element's Drop panics, the
        // remainder leak rather than being dropped twice.
        self.len = 0;
        // SAFETY: slots [0, live) were initialized and are now
        // unreachable through self.
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr(), live));
        }
    }

    /// Append an element, growing the buffer if it is full.
    ///
    /// Growth doubles the capacity (minimum 4), so repeated appends are
    /// amortized O(1).
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if growth fails; the array is
    /// unchanged and `value` is dropped with the error.
    pub fn try_push(&mut self, value: T) -> Result<(), ReserveError> {
        if self.len == self.capacity() {
            self.grow_for_push()?;
        }
        self.push_within_capacity(value);
        Ok(())
    }

    /// Append an element, growing the buffer if it is full.
    ///
    /// # Panics
    ///
    /// Panics where [`try_push`](Self::try_push) would return an error.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            panic!("push failed: {err}");
        }
    }

    /// Replace the contents with `count` clones of `value`.
    ///
    /// The replacement is fully built before the old contents are
    /// released: on a clone panic or allocation failure the array
    /// keeps its previous contents.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated, or propagates a panic
    /// from `T::clone`.
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        let mut fresh = Self::from_elem_in(count, value, self.store().clone());
        mem::swap(self, &mut fresh);
    }

    /// Replace the contents with clones of the elements of `source`.
    ///
    /// Same guarantee as [`assign`](Self::assign). `source` may alias
    /// the array's own buffer: the replacement is built first.
    ///
    /// # Panics
    ///
    /// Panics if the block cannot be allocated, or propagates a panic
    /// from `T::clone`.
    pub fn assign_slice(&mut self, source: &[T])
    where
        T: Clone,
    {
        let mut fresh = match Self::try_with_capacity_in(source.len(), self.store().clone()) {
            Ok(fresh) => fresh,
            Err(err) => panic!("assign_slice failed: {err}"),
        };
        for value in source {
            fresh.push_within_capacity(value.clone());
        }
        mem::swap(self, &mut fresh);
    }

    /// Replace the contents with the elements produced by `iter`.
    ///
    /// Same guarantee as [`assign`](Self::assign).
    ///
    /// # Panics
    ///
    /// Panics if a block cannot be allocated, or propagates a panic
    /// from the iterator.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let mut fresh = match Self::try_with_capacity_in(
            iter.size_hint().0,
            self.store().clone(),
        ) {
            Ok(fresh) => fresh,
            Err(err) => panic!("assign_iter failed: {err}"),
        };
        for value in iter {
            fresh.push(value);
        }
        mem::swap(self, &mut fresh);
    }

    /// Write `value` into the next free slot. The caller has ensured
    /// `len < capacity`.
    fn push_within_capacity(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: slot `len` is in-bounds raw memory.
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Grow for one more element: double the capacity, with a floor of
    /// [`MIN_NON_ZERO_CAP`].
    fn grow_for_push(&mut self) -> Result<(), ReserveError> {
        let required = self
            .len
            .checked_add(1)
            .ok_or(ReserveError::CapacityOverflow { elements: usize::MAX })?;
        let target = cmp::max(
            self.capacity().saturating_mul(2),
            cmp::max(required, MIN_NON_ZERO_CAP),
        );
        // SAFETY: target > len and slots [0, len) are initialized.
        unsafe { self.buf.reallocate(target, self.len) }
    }
}

impl<T, S: Store> Drop for Array<T, S> {
    fn drop(&mut self) {
        // SAFETY: exactly the live prefix is dropped; RawBuf's own Drop
        // then releases the block.
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

// SAFETY: the container exclusively owns its elements and its store;
// sending it sends them, sharing it shares only &T access.
unsafe impl<T: Send, S: Store + Send> Send for Array<T, S> {}
// SAFETY: shared access to the container exposes only &T and &S.
unsafe impl<T: Sync, S: Store + Sync> Sync for Array<T, S> {}

impl<T, S: Store> Deref for Array<T, S> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Store> DerefMut for Array<T, S> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, S: Store, I: SliceIndex<[T]>> Index<I> for Array<T, S> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, S: Store, I: SliceIndex<[T]>> IndexMut<I> for Array<T, S> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, S: Store> AsRef<[T]> for Array<T, S> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Store> AsMut<[T]> for Array<T, S> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, S: Store> Clone for Array<T, S> {
    /// Deep copy: allocates a block of the source's capacity through a
    /// clone of the source's store and clones each live element in
    /// index order.
    fn clone(&self) -> Self {
        let mut out = match Self::try_with_capacity_in(self.capacity(), self.store().clone()) {
            Ok(out) => out,
            Err(err) => panic!("clone failed: {err}"),
        };
        for value in self.as_slice() {
            out.push_within_capacity(value.clone());
        }
        out
    }

    /// Build-then-swap: the copy of `source` is completed before the
    /// old contents are released, so a mid-copy panic leaves `self`
    /// unchanged.
    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        mem::swap(self, &mut fresh);
    }
}

impl<T, S: Store + Default> Default for Array<T, S> {
    fn default() -> Self {
        Self::new_in(S::default())
    }
}

impl<T: fmt::Debug, S: Store> fmt::Debug for Array<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: PartialEq, S: Store, S2: Store> PartialEq<Array<T, S2>> for Array<T, S> {
    fn eq(&self, other: &Array<T, S2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, S: Store> PartialEq<[T]> for Array<T, S> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, S: Store> PartialEq<&[T]> for Array<T, S> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, S: Store, const N: usize> PartialEq<[T; N]> for Array<T, S> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: Store> Eq for Array<T, S> {}

impl<T, const N: usize> From<[T; N]> for Array<T, Global> {
    /// Moves the elements of a fixed-size array in. This is what the
    /// `array![a, b, c]` macro form expands to.
    fn from(values: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for value in values {
            out.push_within_capacity(value);
        }
        out
    }
}

impl<T: Clone> From<&[T]> for Array<T, Global> {
    fn from(values: &[T]) -> Self {
        let mut out = Self::with_capacity(values.len());
        for value in values {
            out.push_within_capacity(value.clone());
        }
        out
    }
}

impl<T> FromIterator<T> for Array<T, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            out.push(value);
        }
        out
    }
}

impl<T, S: Store> Extend<T> for Array<T, S> {
    /// Bulk append. Pre-reserves the iterator's lower size bound, then
    /// pushes with amortized growth.
    ///
    /// # Panics
    ///
    /// Panics if growth fails.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let lower = iter.size_hint().0;
        if let Some(wanted) = self.len.checked_add(lower) {
            self.reserve(wanted);
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T, S: Store> IntoIterator for &'a Array<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, S: Store> IntoIterator for &'a mut Array<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, S: Store> IntoIterator for Array<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    /// Take ownership of the elements. Unvisited elements are dropped,
    /// and the block released, when the iterator is dropped.
    fn into_iter(self) -> IntoIter<T, S> {
        IntoIter::from_array(self)
    }
}

impl<T, S: Store> Array<T, S> {
    /// Disassemble into raw parts for [`IntoIter`]; skips the
    /// container's own `Drop`.
    pub(crate) fn into_raw_buf(self) -> (RawBuf<T, S>, usize) {
        let me = mem::ManuallyDrop::new(self);
        let len = me.len;
        // SAFETY: `me` is never dropped, so `buf` has exactly one owner
        // after this read.
        let buf = unsafe { ptr::read(&me.buf) };
        (buf, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn new_is_empty_and_unallocated() {
        let a: Array<i32> = Array::new();
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
        assert!(a.is_empty());
        assert!(a.as_slice().is_empty());
    }

    #[test]
    fn push_grows_and_preserves_order() {
        let mut a = Array::new();
        for i in 0..100 {
            a.push(i);
            assert_eq!(a.len(), i + 1);
            assert!(a.capacity() >= a.len());
        }
        let collected: Vec<usize> = a.iter().copied().collect();
        assert_eq!(collected, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn growth_doubles_from_the_floor() {
        let mut a = Array::new();
        a.push(1u8);
        assert_eq!(a.capacity(), 4);
        for i in 0..4u8 {
            a.push(i);
        }
        assert_eq!(a.capacity(), 8);
    }

    #[test]
    fn from_elem_fills_every_slot() {
        let a = Array::from_elem(5, 7u64);
        assert_eq!(a.len(), 5);
        assert_eq!(a.capacity(), 5);
        assert!(a.iter().all(|&v| v == 7));
    }

    #[test]
    fn from_elem_zero_is_empty() {
        let a: Array<String> = Array::from_elem(0, String::from("x"));
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn reserve_is_absolute_and_idempotent() {
        let mut a = Array::from([1, 2, 3]);
        a.reserve(10);
        assert_eq!(a.capacity(), 10);
        a.reserve(10);
        assert_eq!(a.capacity(), 10);
        a.reserve(2); // already satisfied
        assert_eq!(a.capacity(), 10);
        assert_eq!(a, [1, 2, 3]);
    }

    #[test]
    fn max_capacity_bounds_every_reservation() {
        assert_eq!(
            Array::<u64>::max_capacity(),
            isize::MAX as usize / mem::size_of::<u64>()
        );
        assert_eq!(Array::<()>::max_capacity(), usize::MAX);

        let mut a: Array<u64> = Array::new();
        let err = a.try_reserve(Array::<u64>::max_capacity() + 1).unwrap_err();
        assert!(matches!(err, ReserveError::CapacityOverflow { .. }));
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn shrink_to_fit_reaches_the_live_count() {
        let mut a = Array::with_capacity(32);
        a.push(1);
        a.push(2);
        a.shrink_to_fit();
        assert_eq!(a.capacity(), 2);
        assert_eq!(a, [1, 2]);
    }

    #[test]
    fn shrink_of_empty_releases_the_block() {
        let mut a: Array<i32> = Array::with_capacity(8);
        a.shrink_to_fit();
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut a = Array::from([1, 2, 3]);
        let cap = a.capacity();
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), cap);
    }

    #[test]
    fn clear_drops_in_index_order() {
        let order: Cell<u32> = Cell::new(0);
        struct Ordered<'a> {
            rank: u32,
            order: &'a Cell<u32>,
        }
        impl Drop for Ordered<'_> {
            fn drop(&mut self) {
                assert_eq!(self.order.get(), self.rank);
                self.order.set(self.rank + 1);
            }
        }
        let mut a = Array::new();
        for rank in 0..4 {
            a.push(Ordered { rank, order: &order });
        }
        a.clear();
        assert_eq!(order.get(), 4);
    }

    #[test]
    fn clone_is_deep() {
        let a = Array::from([1, 2, 3]);
        let mut b = a.clone();
        b[0] = 9;
        assert_eq!(a[0], 1);
        assert_eq!(b[0], 9);
        assert_eq!(b.capacity(), a.capacity());
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source = Array::from([1, 2, 3]);
        let mut dest = Array::from([9, 9]);
        dest.clone_from(&source);
        assert_eq!(dest, source);
    }

    #[test]
    fn assign_family_replaces_contents() {
        let mut a = Array::from([1, 2, 3]);
        a.assign(2, 5);
        assert_eq!(a, [5, 5]);

        a.assign_slice(&[7, 8, 9]);
        assert_eq!(a, [7, 8, 9]);

        a.assign_iter((0..4).map(|v| v * 2));
        assert_eq!(a, [0, 2, 4, 6]);
    }

    #[test]
    fn assign_slice_from_own_buffer_is_safe() {
        let mut a = Array::from([1, 2, 3]);
        // A copy of the live slice keeps the alias explicit; the method
        // builds the replacement before releasing the old block either way.
        let snapshot: Vec<i32> = a.to_vec();
        a.assign_slice(&snapshot);
        assert_eq!(a, [1, 2, 3]);
    }

    #[test]
    fn checked_and_unchecked_access_agree() {
        let a = Array::from([10, 20, 30]);
        for i in 0..a.len() {
            assert_eq!(a.get(i), Some(&a[i]));
        }
        assert_eq!(a.get(3), None);
        assert_eq!(a.first(), Some(&10));
        // The last live element, not one past it.
        assert_eq!(a.last(), Some(&30));
    }

    #[test]
    fn equality_is_element_wise() {
        let a = Array::from([1, 2, 3]);
        let mut b = Array::with_capacity(64);
        b.extend([1, 2, 3]);
        assert_eq!(a, b); // capacity does not participate
        assert_eq!(a, [1, 2, 3]);
        assert!(a == [1, 2, 3][..]);
        b.push(4);
        assert_ne!(a, b);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut a = Array::from([1]);
        a.extend(2..5);
        assert_eq!(a, [1, 2, 3, 4]);
    }

    #[test]
    fn from_iterator_collects() {
        let a: Array<u32> = (0..5).collect();
        assert_eq!(a, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn debug_formats_as_a_list() {
        let a = Array::from([1, 2]);
        assert_eq!(format!("{a:?}"), "[1, 2]");
    }

    #[test]
    fn zero_sized_elements_track_length_without_storage() {
        let mut a = Array::new();
        for _ in 0..1000 {
            a.push(());
        }
        assert_eq!(a.len(), 1000);
        assert_eq!(a.capacity(), usize::MAX);
        assert_eq!(a.iter().count(), 1000);
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn drop_runs_once_per_live_element() {
        let drops = Cell::new(0u32);
        struct Counted<'a>(&'a Cell<u32>);
        impl Drop for Counted<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }
        {
            let mut a = Array::new();
            for _ in 0..8 {
                a.push(Counted(&drops));
            }
            a.reserve(100); // migration must not drop or duplicate
            assert_eq!(drops.get(), 0);
        }
        assert_eq!(drops.get(), 8);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Driver operations for the state-machine property below.
        #[derive(Clone, Debug)]
        enum Op {
            Push(i64),
            Reserve(usize),
            Clear,
            Shrink,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => any::<i64>().prop_map(Op::Push),
                2 => (0usize..64).prop_map(Op::Reserve),
                1 => Just(Op::Clear),
                1 => Just(Op::Shrink),
            ]
        }

        proptest! {
            #[test]
            fn invariants_hold_under_arbitrary_ops(
                ops in proptest::collection::vec(op_strategy(), 1..100),
            ) {
                let mut a: Array<i64> = Array::new();
                let mut model: Vec<i64> = Vec::new();
                for op in ops {
                    match op {
                        Op::Push(v) => {
                            a.push(v);
                            model.push(v);
                        }
                        Op::Reserve(n) => a.reserve(n),
                        Op::Clear => {
                            a.clear();
                            model.clear();
                        }
                        Op::Shrink => a.shrink_to_fit(),
                    }
                    // Size/capacity invariant and content agreement
                    // after every step, growth events included.
                    prop_assert!(a.len() <= a.capacity());
                    prop_assert_eq!(a.len(), model.len());
                    prop_assert_eq!(a.as_slice(), model.as_slice());
                }
            }

            #[test]
            fn copies_are_independent(
                values in proptest::collection::vec(any::<u32>(), 0..50),
                mutation in any::<u32>(),
            ) {
                let a: Array<u32> = values.iter().copied().collect();
                let mut b = a.clone();
                prop_assert_eq!(&a, &b);
                if !b.is_empty() {
                    b[0] = mutation;
                    prop_assert_eq!(a[0], values[0]);
                }
                b.push(mutation);
                prop_assert_eq!(a.len(), values.len());
            }

            #[test]
            fn iteration_matches_slice_order(
                values in proptest::collection::vec(any::<i32>(), 0..50),
            ) {
                let a: Array<i32> = values.iter().copied().collect();
                let forward: Vec<i32> = a.iter().copied().collect();
                let backward: Vec<i32> = a.iter().rev().copied().collect();
                prop_assert_eq!(forward, values.clone());
                let mut reversed = values;
                reversed.reverse();
                prop_assert_eq!(backward, reversed);
            }
        }
    }
}
