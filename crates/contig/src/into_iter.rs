//! The owning cursor produced by consuming an [`Array`].
//!
//! [`IntoIter`] takes the array's buffer with it: elements are moved
//! out one at a time from either end, anything unvisited is dropped
//! when the iterator is dropped, and the block then goes back to the
//! store via the buffer handle's own `Drop`.
//!
//! [`Array`]: crate::Array

use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use contig_store::{Global, Store};

use crate::array::Array;
use crate::raw::RawBuf;

/// An iterator that moves elements out of an array.
///
/// Created by [`Array`]'s [`IntoIterator`] impl. Double-ended; the
/// unvisited range is `[start, end)` in slot indices.
pub struct IntoIter<T, S: Store = Global> {
    buf: RawBuf<T, S>,
    start: usize,
    end: usize,
}

impl<T, S: Store> IntoIter<T, S> {
    pub(crate) fn from_array(array: Array<T, S>) -> Self {
        let (buf, len) = array.into_raw_buf();
        Self {
            buf,
            start: 0,
            end: len,
        }
    }

    /// The unvisited elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [start, end) are initialized and owned by the
        // iterator.
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, S: Store> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slot `start` is initialized; bumping `start` makes
        // this the slot's unique read.
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }

    fn count(self) -> usize {
        self.end - self.start
    }
}

impl<T, S: Store> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was the last unvisited one; shrinking
        // `end` first makes this its unique read.
        Some(unsafe { self.buf.ptr().add(self.end).read() })
    }
}

impl<T, S: Store> ExactSizeIterator for IntoIter<T, S> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T, S: Store> FusedIterator for IntoIter<T, S> {}

impl<T, S: Store> Drop for IntoIter<T, S> {
    fn drop(&mut self) {
        // Drop whatever was not moved out; RawBuf's Drop then releases
        // the block.
        let remaining = self.end - self.start;
        // SAFETY: slots [start, end) are initialized and about to
        // become unreachable.
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(
                self.buf.ptr().add(self.start),
                remaining,
            ));
        }
    }
}

impl<T: fmt::Debug, S: Store> fmt::Debug for IntoIter<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

// SAFETY: the iterator exclusively owns its elements and store.
unsafe impl<T: Send, S: Store + Send> Send for IntoIter<T, S> {}
// SAFETY: shared access exposes only &T.
unsafe impl<T: Sync, S: Store + Sync> Sync for IntoIter<T, S> {}
