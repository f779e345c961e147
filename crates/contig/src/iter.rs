//! Borrowing cursors over the live prefix of an [`Array`].
//!
//! [`Iter`] and [`IterMut`] are position-plus-remaining cursors: a
//! head pointer into the buffer and a count of unvisited elements.
//! They carry no ownership; validity is enforced by the borrow they
//! hold on the array, which statically rules out use across a
//! reallocation or past the array's destruction.
//!
//! Both ends are traversable ([`DoubleEndedIterator`]), which is the
//! reverse-iteration surface: `array.iter().rev()` visits back to
//! front without copying elements. Cursors from the same array
//! generation compare by position (`==`, `<`, …).
//!
//! [`Array`]: crate::Array

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use core::slice;

/// Advance a head pointer by `n` slots.
///
/// Zero-sized element types have no addresses to advance through; the
/// head stays put and only the remaining-count moves.
fn advance<T>(head: NonNull<T>, n: usize) -> NonNull<T> {
    if mem::size_of::<T>() == 0 {
        head
    } else {
        // SAFETY: the caller keeps `head + n` inside (or one past) the
        // buffer the cursor was created over.
        unsafe { NonNull::new_unchecked(head.as_ptr().add(n)) }
    }
}

/// A shared cursor over the live elements of an array.
///
/// Created by [`Array::iter`]. Yields `&T` front to back; `.rev()`
/// for back to front.
///
/// [`Array::iter`]: crate::Array::iter
pub struct Iter<'a, T> {
    head: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slice: &'a [T]) -> Self {
        Self {
            // SAFETY: a slice pointer is never null.
            head: unsafe { NonNull::new_unchecked(slice.as_ptr() as *mut T) },
            remaining: slice.len(),
            _marker: PhantomData,
        }
    }

    /// The unvisited elements as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: head points at `remaining` live elements borrowed
        // for 'a.
        unsafe { slice::from_raw_parts(self.head.as_ptr(), self.remaining) }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining > 0, so head points at a live element.
        let item = unsafe { &*self.head.as_ptr() };
        self.head = advance(self.head, 1);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize {
        self.remaining
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: head + remaining is the last unvisited element.
        let item = unsafe { &*advance(self.head, self.remaining).as_ptr() };
        Some(item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.as_slice()).finish()
    }
}

impl<T> PartialEq for Iter<'_, T> {
    /// Cursors are equal when they denote the same position of the
    /// same array generation. Comparing cursors from different arrays
    /// or across a reallocation is meaningless (though memory-safe).
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.remaining == other.remaining
    }
}

impl<T> Eq for Iter<'_, T> {}

impl<T> PartialOrd for Iter<'_, T> {
    /// Position order within one array generation: a cursor that has
    /// further to go is the earlier one.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            (self.head.as_ptr() as usize)
                .cmp(&(other.head.as_ptr() as usize))
                .then(other.remaining.cmp(&self.remaining)),
        )
    }
}

/// An exclusive cursor over the live elements of an array.
///
/// Created by [`Array::iter_mut`]. Yields `&mut T` front to back;
/// `.rev()` for back to front.
///
/// [`Array::iter_mut`]: crate::Array::iter_mut
pub struct IterMut<'a, T> {
    head: NonNull<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self {
            // SAFETY: a slice pointer is never null.
            head: unsafe { NonNull::new_unchecked(slice.as_mut_ptr()) },
            remaining: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Consume the cursor, returning the unvisited elements as a
    /// mutable slice.
    pub fn into_slice(self) -> &'a mut [T] {
        // SAFETY: head points at `remaining` live elements exclusively
        // borrowed for 'a, and self is consumed.
        unsafe { slice::from_raw_parts_mut(self.head.as_ptr(), self.remaining) }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: remaining > 0, so head points at a live element; the
        // cursor never yields the same slot twice, so handing out
        // &'a mut is sound.
        let item = unsafe { &mut *self.head.as_ptr() };
        self.head = advance(self.head, 1);
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize {
        self.remaining
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: head + remaining is the last unvisited element, and
        // it will not be yielded again.
        let item = unsafe { &mut *advance(self.head, self.remaining).as_ptr() };
        Some(item)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: a shared view of the unvisited range; no &mut is
        // outstanding while fmt holds &self.
        let rest = unsafe { slice::from_raw_parts(self.head.as_ptr(), self.remaining) };
        f.debug_tuple("IterMut").field(&rest).finish()
    }
}

impl<T> PartialEq for IterMut<'_, T> {
    /// Cursors are equal when they denote the same position of the
    /// same array generation. Comparison touches only the position
    /// and count, never the elements.
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.remaining == other.remaining
    }
}

impl<T> Eq for IterMut<'_, T> {}

impl<T> PartialOrd for IterMut<'_, T> {
    /// Position order within one array generation, as for [`Iter`].
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            (self.head.as_ptr() as usize)
                .cmp(&(other.head.as_ptr() as usize))
                .then(other.remaining.cmp(&self.remaining)),
        )
    }
}

// SAFETY: a shared cursor only hands out &T.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// SAFETY: as above; &Iter exposes nothing beyond &T.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}
// SAFETY: an exclusive cursor hands out &mut T, so sending it is
// sending the elements.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: &IterMut exposes only shared views of the elements.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
