//! Iterators over the items of a [`KeyedPool`].
//!
//! All of them visit slots in index order and skip vacant slots. Each vacant slot is stepped
//! over once per traversal, so a full traversal costs time proportional to the number of slots.

use std::any::type_name;
use std::iter::{Enumerate, FusedIterator};
use std::{fmt, slice, vec};

use crate::{Entry, Key, KeyedPool};

/// Iterator over the items of a [`KeyedPool`] paired with their keys.
///
/// Created by [`KeyedPool::iter()`].
pub struct Iter<'p, T> {
    entries: Enumerate<slice::Iter<'p, Entry<T>>>,

    /// Number of occupied slots not yet yielded from either end.
    remaining: usize,
}

impl<'p, T> Iter<'p, T> {
    pub(crate) fn new(entries: &'p [Entry<T>], remaining: usize) -> Self {
        Self {
            entries: entries.iter().enumerate(),
            remaining,
        }
    }

    fn yielded(&mut self) {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .expect("cannot yield more items than there are occupied slots");
    }
}

impl<'p, T> Iterator for Iter<'p, T> {
    type Item = (Key, &'p T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .find_map(|(index, entry)| entry.occupied(index))?;

        self.yielded();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .by_ref()
            .rev()
            .find_map(|(index, entry)| entry.occupied(index))?;

        self.yielded();
        Some(item)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Iterator over exclusive references to the items of a [`KeyedPool`] paired with their keys.
///
/// Created by [`KeyedPool::iter_mut()`].
pub struct IterMut<'p, T> {
    entries: Enumerate<slice::IterMut<'p, Entry<T>>>,
    remaining: usize,
}

impl<'p, T> IterMut<'p, T> {
    pub(crate) fn new(entries: &'p mut [Entry<T>], remaining: usize) -> Self {
        Self {
            entries: entries.iter_mut().enumerate(),
            remaining,
        }
    }

    fn yielded(&mut self) {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .expect("cannot yield more items than there are occupied slots");
    }
}

impl<'p, T> Iterator for IterMut<'p, T> {
    type Item = (Key, &'p mut T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .find_map(|(index, entry)| entry.occupied_mut(index))?;

        self.yielded();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .by_ref()
            .rev()
            .find_map(|(index, entry)| entry.occupied_mut(index))?;

        self.yielded();
        Some(item)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Iterator over the keys of the items of a [`KeyedPool`].
///
/// Created by [`KeyedPool::keys()`].
#[derive(Clone, Debug)]
pub struct Keys<'p, T> {
    inner: Iter<'p, T>,
}

impl<'p, T> Keys<'p, T> {
    pub(crate) fn new(inner: Iter<'p, T>) -> Self {
        Self { inner }
    }
}

impl<T> Iterator for Keys<'_, T> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Keys<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}

impl<T> FusedIterator for Keys<'_, T> {}

/// Iterator over the items of a [`KeyedPool`].
///
/// Created by [`KeyedPool::values()`].
#[derive(Clone, Debug)]
pub struct Values<'p, T> {
    inner: Iter<'p, T>,
}

impl<'p, T> Values<'p, T> {
    pub(crate) fn new(inner: Iter<'p, T>) -> Self {
        Self { inner }
    }
}

impl<'p, T> Iterator for Values<'p, T> {
    type Item = &'p T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Values<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}

impl<T> FusedIterator for Values<'_, T> {}

/// Iterator over exclusive references to the items of a [`KeyedPool`].
///
/// Created by [`KeyedPool::values_mut()`].
#[derive(Debug)]
pub struct ValuesMut<'p, T> {
    inner: IterMut<'p, T>,
}

impl<'p, T> ValuesMut<'p, T> {
    pub(crate) fn new(inner: IterMut<'p, T>) -> Self {
        Self { inner }
    }
}

impl<'p, T> Iterator for ValuesMut<'p, T> {
    type Item = &'p mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for ValuesMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for ValuesMut<'_, T> {}

impl<T> FusedIterator for ValuesMut<'_, T> {}

/// Owning iterator over the items of a [`KeyedPool`] paired with their keys.
///
/// Created by calling `into_iter()` on a [`KeyedPool`].
pub struct IntoIter<T> {
    entries: Enumerate<vec::IntoIter<Entry<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(entries: Vec<Entry<T>>, remaining: usize) -> Self {
        Self {
            entries: entries.into_iter().enumerate(),
            remaining,
        }
    }

    fn yielded(&mut self) {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .expect("cannot yield more items than there are occupied slots");
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Key, T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .find_map(|(index, entry)| entry.into_occupied(index))?;

        self.yielded();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self
            .entries
            .by_ref()
            .rev()
            .find_map(|(index, entry)| entry.into_occupied(index))?;

        self.yielded();
        Some(item)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Draining iterator that removes the items of a [`KeyedPool`] in slot order.
///
/// Dropping the iterator drops the items not yet yielded. Created by [`KeyedPool::drain()`].
pub struct Drain<'p, T> {
    pool: &'p mut KeyedPool<T>,

    /// Slot index to look at next. Slots below this have already been vacated.
    next_index: usize,
}

impl<'p, T> Drain<'p, T> {
    pub(crate) fn new(pool: &'p mut KeyedPool<T>) -> Self {
        Self {
            pool,
            next_index: 0,
        }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.pool.slot_count() {
            let index = self.next_index;
            self.next_index = index
                .checked_add(1)
                .expect("index is below the slot count so cannot overflow");

            if let Some((_, value)) = self.pool.vacate(index) {
                return Some(value);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every slot before `next_index` is vacant, so all remaining items lie ahead of it.
        let remaining = self.pool.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.by_ref().for_each(drop);

        self.pool.release_vacant_slots();
    }
}

impl<T> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("next_index", &self.next_index)
            .finish_non_exhaustive()
    }
}
