use std::any::type_name;
use std::ops::{Index, IndexMut};
use std::{fmt, mem, thread};

use tracing::{debug, trace};

use crate::{
    DisplayValues, Drain, DropPolicy, Entry, IntoIter, Iter, IterMut, Key, KeyError, KeyPolicy,
    KeyedPoolBuilder, Keys, Result, Values, ValuesMut,
};

/// An object pool of unbounded size that stores items behind small reusable integer keys.
///
/// Inserting an item returns a [`Key`] that can later be used to look up, take back or remove
/// the item. The slot and key of a removed item are reused by the next inserted item, the most
/// recently vacated slot first. Once the pool has grown to its working size, inserting and
/// removing items does not allocate.
///
/// There are multiple ways to insert items into the collection:
///
/// * [`insert()`][1] - moves a value into the pool and returns the key.
/// * [`insert_cloned()`][2] - clones a value the caller wants to keep into the pool.
/// * [`insert_with()`][3] - builds the value from the key it is about to receive, which is
///   useful if the item needs to know its own key.
///
/// # Key validity
///
/// A key is valid from the insertion that produced it until the item is removed or taken.
/// Under the default [`KeyPolicy::Unchecked`], a key used after that point silently refers to
/// whatever item was since inserted into the same slot. Use [`KeyPolicy::Checked`] (via
/// [`builder()`][4]) to have such stale keys rejected.
///
/// # Resource usage
///
/// The slot storage grows like a `Vec` (geometrically, moving every slot on reallocation) and
/// never shrinks while items are being inserted and removed. Vacated slots are remembered in a
/// separate stack whose capacity grows independently.
///
/// # Thread safety
///
/// The pool performs no internal synchronization. It is [`Send`] and [`Sync`] if `T` is, so it
/// can be shared between threads behind a `Mutex` or similar.
///
/// [1]: Self::insert
/// [2]: Self::insert_cloned
/// [3]: Self::insert_with
/// [4]: Self::builder
#[derive(Clone, Debug)]
pub struct KeyedPool<T> {
    /// Backing storage of the pool. Only ever grows by appending; removing an item vacates
    /// its slot in place.
    entries: Vec<Entry<T>>,

    /// Indexes of vacant slots, the most recently vacated on top. The next inserted item goes
    /// into the slot on top of the stack and only if the stack is empty do we append a new slot.
    ///
    /// Every vacant slot appears in the stack exactly once and no occupied slot appears in it.
    vacant_stack: Vec<usize>,

    key_policy: KeyPolicy,
    drop_policy: DropPolicy,
}

impl<T> KeyedPool<T> {
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "half the capacity rounded down is the intended stack reservation"
    )]
    pub(crate) fn new_inner(
        capacity: usize,
        key_policy: KeyPolicy,
        drop_policy: DropPolicy,
    ) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            vacant_stack: Vec::with_capacity(capacity / 2),
            key_policy,
            drop_policy,
        }
    }

    /// Creates a new [`KeyedPool`] with the default configuration.
    ///
    /// The pool starts empty with zero capacity and will automatically grow as needed when
    /// items are inserted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    ///
    /// assert_eq!(pool.len(), 0);
    /// assert!(pool.is_empty());
    /// assert_eq!(pool.slots_capacity(), 0);
    ///
    /// let key = pool.insert("Hello".to_string());
    /// assert_eq!(pool.len(), 1);
    /// assert_eq!(pool.get(key), "Hello");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new [`KeyedPool`] with room for `capacity` items.
    ///
    /// The stack of vacated slots is given room for `capacity / 2` entries, anticipating that
    /// roughly half of the items churn. This is equivalent to
    /// `KeyedPool::builder().capacity(capacity).build()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let pool = KeyedPool::<u32>::with_capacity(10);
    ///
    /// assert!(pool.is_empty());
    /// assert!(pool.slots_capacity() >= 10);
    /// assert!(pool.stack_capacity() >= 5);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::builder().capacity(capacity).build()
    }

    /// Starts building a new [`KeyedPool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::{KeyPolicy, KeyedPool};
    ///
    /// let pool = KeyedPool::<u32>::builder()
    ///     .key_policy(KeyPolicy::Checked)
    ///     .build();
    ///
    /// assert!(pool.is_empty());
    /// ```
    pub fn builder() -> KeyedPoolBuilder<T> {
        KeyedPoolBuilder::new()
    }

    /// The number of items in the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<i32>::new();
    ///
    /// let key1 = pool.insert(42);
    /// let _key2 = pool.insert(24);
    /// assert_eq!(pool.len(), 2);
    ///
    /// pool.remove(key1);
    /// assert_eq!(pool.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .len()
            .checked_sub(self.vacant_stack.len())
            .expect("there cannot be more vacant slots than there are slots")
    }

    /// Whether the pool is empty.
    ///
    /// An empty pool may still be holding vacant slots and unused capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of slots the pool can hold without reallocating its slot storage.
    ///
    /// This is a diagnostic value for tuning the initial capacity, not part of the logical
    /// contract of the pool.
    #[must_use]
    pub fn slots_capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The number of vacated slots the pool can remember without reallocating its stack of
    /// vacated slots.
    ///
    /// This is a diagnostic value for tuning the initial capacity, not part of the logical
    /// contract of the pool.
    #[must_use]
    pub fn stack_capacity(&self) -> usize {
        self.vacant_stack.capacity()
    }

    /// The [key policy][KeyPolicy] the pool was built with.
    #[must_use]
    pub fn key_policy(&self) -> KeyPolicy {
        self.key_policy
    }

    /// The [drop policy][DropPolicy] the pool was built with.
    #[must_use]
    pub fn drop_policy(&self) -> DropPolicy {
        self.drop_policy
    }

    /// Reserves capacity for at least `additional` more items to be inserted in the pool.
    ///
    /// Vacant slots count towards the reservation, so this only grows the slot storage by the
    /// number of items that would not fit into vacant slots.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<u32>::new();
    ///
    /// pool.reserve(10);
    /// assert!(pool.slots_capacity() >= 10);
    /// ```
    #[cfg_attr(test, mutants::skip)] // Can be mutated to infinitely growing memory use.
    pub fn reserve(&mut self, additional: usize) {
        let new_slots = additional.saturating_sub(self.vacant_stack.len());
        let previous_capacity = self.entries.capacity();

        self.entries.reserve(new_slots);

        if self.entries.capacity() != previous_capacity {
            debug!(
                slots_capacity = self.entries.capacity(),
                item_type = type_name::<T>(),
                "reserved slot storage"
            );
        }
    }

    /// The key that the next inserted item will receive.
    ///
    /// This is the most recently vacated slot if there is one, otherwise a new slot at the end of
    /// the slot storage.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<char>::new();
    /// let a = pool.insert('a');
    /// let b = pool.insert('b');
    ///
    /// pool.remove(a);
    /// pool.remove(b);
    ///
    /// // The most recently vacated slot is reused first.
    /// assert_eq!(pool.vacant_key(), b);
    /// assert_eq!(pool.insert('c'), b);
    /// assert_eq!(pool.vacant_key(), a);
    /// ```
    #[must_use]
    pub fn vacant_key(&self) -> Key {
        match self.vacant_stack.last() {
            Some(&index) => {
                let generation = self
                    .entries
                    .get(index)
                    .map(Entry::generation)
                    .expect("vacant stack only holds indexes of existing slots");

                Key::new(index, generation)
            }
            None => Key::new(self.entries.len(), 0),
        }
    }

    /// Inserts an item into the pool and returns its key.
    ///
    /// The item is moved into the pool. If the caller wants to keep their own copy, use
    /// [`insert_cloned()`][Self::insert_cloned].
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<i32>::new();
    ///
    /// let key = pool.insert(42);
    /// assert_eq!(*pool.get(key), 42);
    /// ```
    pub fn insert(&mut self, value: T) -> Key {
        self.insert_with(|_| value)
    }

    /// Inserts a clone of an item into the pool and returns the key of the clone.
    ///
    /// The value is cloned exactly once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    ///
    /// let greeting = "Hello".to_string();
    /// let key = pool.insert_cloned(&greeting);
    ///
    /// assert_eq!(pool.get(key), &greeting);
    /// ```
    pub fn insert_cloned(&mut self, value: &T) -> Key
    where
        T: Clone,
    {
        self.insert(value.clone())
    }

    /// Inserts an item built from the key it is about to receive.
    ///
    /// If `f` panics, the pool is left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::{Key, KeyedPool};
    ///
    /// struct Node {
    ///     me: Key,
    /// }
    ///
    /// let mut pool = KeyedPool::<Node>::new();
    ///
    /// let key = pool.insert_with(|me| Node { me });
    /// assert_eq!(pool.get(key).me, key);
    /// ```
    pub fn insert_with(&mut self, f: impl FnOnce(Key) -> T) -> Key {
        let key = self.vacant_key();
        let value = f(key);

        if let Some(index) = self.vacant_stack.pop() {
            let entry = self
                .entries
                .get_mut(index)
                .expect("vacant stack only holds indexes of existing slots");

            if entry.is_occupied() {
                panic!(
                    "entry {index} was not vacant when we inserted into it in pool of {}",
                    type_name::<T>()
                );
            }

            *entry = Entry::Occupied {
                value,
                generation: key.generation(),
            };

            trace!(index, item_type = type_name::<T>(), "reused vacant slot");
        } else {
            let previous_capacity = self.entries.capacity();

            self.entries.push(Entry::Occupied {
                value,
                generation: key.generation(),
            });

            if self.entries.capacity() != previous_capacity {
                debug!(
                    slots_capacity = self.entries.capacity(),
                    item_type = type_name::<T>(),
                    "slot storage grew"
                );
            }
        }

        key
    }

    /// Whether the key is associated with an item in the pool.
    ///
    /// This never panics; keys that are out of range, refer to a vacant slot or (under
    /// [`KeyPolicy::Checked`]) are stale simply yield `false`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::{Key, KeyedPool};
    ///
    /// let mut pool = KeyedPool::<u8>::new();
    /// let key = pool.insert(1);
    ///
    /// assert!(pool.contains(key));
    /// assert!(!pool.contains(Key::from_index(1_000_000)));
    ///
    /// pool.remove(key);
    /// assert!(!pool.contains(key));
    /// ```
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.try_get(key).is_ok()
    }

    /// Gets a reference to an item in the pool by its key, reporting why the key cannot be used
    /// if it is not associated with an item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::{Key, KeyError, KeyedPool};
    ///
    /// let mut pool = KeyedPool::<u8>::new();
    /// let key = pool.insert(7);
    ///
    /// assert_eq!(pool.try_get(key), Ok(&7));
    /// assert_eq!(
    ///     pool.try_get(Key::from_index(5)),
    ///     Err(KeyError::OutOfRange {
    ///         index: 5,
    ///         slot_count: 1
    ///     })
    /// );
    /// ```
    pub fn try_get(&self, key: Key) -> std::result::Result<&T, KeyError> {
        self.entry(key)?.value(key, self.key_policy)
    }

    /// Gets an exclusive reference to an item in the pool by its key, reporting why the key
    /// cannot be used if it is not associated with an item.
    pub fn try_get_mut(&mut self, key: Key) -> std::result::Result<&mut T, KeyError> {
        let key_policy = self.key_policy;
        self.entry_mut(key)?.value_mut(key, key_policy)
    }

    /// Gets a reference to an item in the pool by its key.
    ///
    /// Use [`contains()`][Self::contains] first if the key may not be valid, or use
    /// [`try_get()`][Self::try_get].
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    /// let key = pool.insert("Hello, World!".to_string());
    ///
    /// assert_eq!(pool.get(key), "Hello, World!");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an item.
    #[must_use]
    pub fn get(&self, key: Key) -> &T {
        self.try_get(key).unwrap_or_else(|error| {
            panic!(
                "get({key:?}) failed in pool of {}: {error}",
                type_name::<T>()
            )
        })
    }

    /// Gets an exclusive reference to an item in the pool by its key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    /// let key = pool.insert("Hello".to_string());
    ///
    /// pool.get_mut(key).push_str(", World!");
    ///
    /// assert_eq!(pool.get(key), "Hello, World!");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the key is not associated with an item.
    #[must_use]
    pub fn get_mut(&mut self, key: Key) -> &mut T {
        self.try_get_mut(key).unwrap_or_else(|error| {
            panic!(
                "get_mut({key:?}) failed in pool of {}: {error}",
                type_name::<T>()
            )
        })
    }

    /// Removes an item from the pool by its key, dropping it.
    ///
    /// Returns `false` and does nothing if the key is not associated with an item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    /// let key = pool.insert("Hello".to_string());
    ///
    /// assert!(pool.remove(key));
    /// assert!(!pool.remove(key));
    /// assert!(pool.is_empty());
    /// ```
    pub fn remove(&mut self, key: Key) -> bool {
        self.take(key).is_some()
    }

    /// Removes an item from the pool by its key and hands it back to the caller.
    ///
    /// Returns `None` and does nothing if the key is not associated with an item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::<String>::new();
    /// let key = pool.insert("Hello".to_string());
    ///
    /// assert_eq!(pool.take(key), Some("Hello".to_string()));
    /// assert_eq!(pool.take(key), None);
    /// ```
    #[must_use = "use remove() if you want to drop the item"]
    pub fn take(&mut self, key: Key) -> Option<T> {
        self.entry(key).ok()?.value(key, self.key_policy).ok()?;

        self.vacate(key.index()).map(|(_, value)| value)
    }

    /// Retains only the items for which `f` returns `true`, dropping the others.
    ///
    /// Items are visited in slot order and the vacated slots are reused in reverse slot order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::from_iter(1..=6);
    ///
    /// pool.retain(|_, value| *value % 2 == 0);
    ///
    /// assert_eq!(pool.values().copied().collect::<Vec<_>>(), [2, 4, 6]);
    /// ```
    pub fn retain(&mut self, mut f: impl FnMut(Key, &mut T) -> bool) {
        for index in 0..self.entries.len() {
            let keep = self
                .entries
                .get_mut(index)
                .and_then(|entry| entry.occupied_mut(index))
                .is_none_or(|(key, value)| f(key, value));

            if !keep {
                drop(self.vacate(index));
            }
        }
    }

    /// Removes all items from the pool, dropping them.
    ///
    /// Under [`KeyPolicy::Unchecked`], all slots are released as well, so key numbering starts
    /// from zero again. Under [`KeyPolicy::Checked`], the slots stay allocated but vacant so that
    /// keys issued before the clear are still recognized as stale.
    ///
    /// Capacity is retained in both cases.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::from_iter(["a", "b"]);
    ///
    /// pool.clear();
    ///
    /// assert!(pool.is_empty());
    /// assert_eq!(pool.insert("c").index(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.drain().for_each(drop);
    }

    /// Removes all items from the pool, returning them in slot order.
    ///
    /// When the returned iterator is dropped, any items not yet yielded are dropped and the slots
    /// are released as described for [`clear()`][Self::clear].
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::from_iter([1, 2, 3]);
    ///
    /// let drained = pool.drain().collect::<Vec<_>>();
    ///
    /// assert_eq!(drained, [1, 2, 3]);
    /// assert!(pool.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }

    /// Iterates over the items in the pool in slot order, paired with their keys.
    ///
    /// Vacant slots are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::new();
    /// let a = pool.insert('a');
    /// let b = pool.insert('b');
    ///
    /// assert_eq!(pool.iter().collect::<Vec<_>>(), [(a, &'a'), (b, &'b')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.entries, self.len())
    }

    /// Iterates over exclusive references to the items in the pool in slot order, paired with
    /// their keys.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len();
        IterMut::new(&mut self.entries, len)
    }

    /// Iterates over the keys of the items in the pool in slot order.
    pub fn keys(&self) -> Keys<'_, T> {
        Keys::new(self.iter())
    }

    /// Iterates over the items in the pool in slot order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let pool = KeyedPool::from_iter([1, 2, 4, 8, 16]);
    ///
    /// assert_eq!(pool.values().sum::<i32>(), 31);
    /// ```
    pub fn values(&self) -> Values<'_, T> {
        Values::new(self.iter())
    }

    /// Iterates over exclusive references to the items in the pool in slot order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, T> {
        ValuesMut::new(self.iter_mut())
    }

    /// A cursor positioned at the first item in the pool, or at the end if the pool is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let empty = KeyedPool::<u8>::new();
    /// assert_eq!(empty.begin(), empty.end());
    ///
    /// let pool = KeyedPool::from_iter([10, 20]);
    /// let mut cursor = pool.begin();
    ///
    /// assert_eq!(cursor.get(), Some(&10));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&20));
    /// cursor.move_next();
    /// assert_eq!(cursor, pool.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// A cursor positioned one past the last slot of the pool.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.entries.len())
    }

    /// A cursor with exclusive access to the pool, positioned at the first item in the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let mut pool = KeyedPool::from_iter([1, 2, 3]);
    /// let mut cursor = pool.cursor_mut();
    ///
    /// while let Some(value) = cursor.get_mut() {
    ///     *value *= 10;
    ///     cursor.move_next();
    /// }
    ///
    /// assert_eq!(pool.to_string(), "10 20 30");
    /// ```
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        let index = self.next_occupied_from(0);

        CursorMut { pool: self, index }
    }

    /// Renders the items of the pool in slot order, separated by `separator`.
    ///
    /// The pool itself implements [`Display`][fmt::Display] with a single space as the
    /// separator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyed_pool::KeyedPool;
    ///
    /// let pool = KeyedPool::from_iter(["orange", "apple", "raspberry"]);
    ///
    /// assert_eq!(pool.display(',').to_string(), "orange,apple,raspberry");
    /// assert_eq!(pool.to_string(), "orange apple raspberry");
    /// ```
    pub fn display(&self, separator: char) -> DisplayValues<'_, T> {
        DisplayValues::new(self, separator)
    }

    /// Number of slots, occupied or vacant. Doubles as the end position of cursors.
    #[must_use]
    pub(crate) fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Vacates the slot at `index`, returning the item that occupied it.
    pub(crate) fn vacate(&mut self, index: usize) -> Option<(Key, T)> {
        let entry = self.entries.get_mut(index)?;

        if !entry.is_occupied() {
            return None;
        }

        let vacant = Entry::Vacant {
            generation: self.key_policy.next_generation(entry.generation()),
        };

        let occupied = mem::replace(entry, vacant).into_occupied(index);

        let previous_capacity = self.vacant_stack.capacity();
        self.vacant_stack.push(index);

        if self.vacant_stack.capacity() != previous_capacity {
            debug!(
                stack_capacity = self.vacant_stack.capacity(),
                item_type = type_name::<T>(),
                "vacant slot stack grew"
            );
        }

        occupied
    }

    /// Drops all slots of an empty pool whose keys are not generation-checked, so that key
    /// numbering restarts from zero. Pools with checked keys keep their vacant slots.
    pub(crate) fn release_vacant_slots(&mut self) {
        if self.key_policy != KeyPolicy::Unchecked || !self.is_empty() || self.entries.is_empty()
        {
            return;
        }

        debug!(
            slot_count = self.entries.len(),
            item_type = type_name::<T>(),
            "released all vacant slots"
        );

        self.entries.clear();
        self.vacant_stack.clear();
    }

    fn entry(&self, key: Key) -> Result<&Entry<T>> {
        self.entries.get(key.index()).ok_or(KeyError::OutOfRange {
            index: key.index(),
            slot_count: self.entries.len(),
        })
    }

    fn entry_mut(&mut self, key: Key) -> Result<&mut Entry<T>> {
        let slot_count = self.entries.len();

        self.entries
            .get_mut(key.index())
            .ok_or(KeyError::OutOfRange {
                index: key.index(),
                slot_count,
            })
    }

    /// Index of the first occupied slot at or after `start`, or the slot count if there is none.
    #[must_use]
    fn next_occupied_from(&self, start: usize) -> usize {
        self.entries
            .get(start..)
            .and_then(|rest| rest.iter().position(Entry::is_occupied))
            .map_or(self.entries.len(), |offset| {
                start
                    .checked_add(offset)
                    .expect("offset is within the slot storage so cannot overflow")
            })
    }

    /// Index of the last occupied slot before `end`, if any.
    #[must_use]
    fn prev_occupied_before(&self, end: usize) -> Option<usize> {
        self.entries
            .get(..end.min(self.entries.len()))?
            .iter()
            .rposition(Entry::is_occupied)
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(test)]
    pub(crate) fn integrity_check(&self) {
        let mut seen_in_stack = vec![false; self.entries.len()];

        for &index in &self.vacant_stack {
            let seen = seen_in_stack
                .get_mut(index)
                .unwrap_or_else(|| panic!("vacant stack holds out of bounds index {index}"));

            assert!(!*seen, "vacant stack holds index {index} more than once");
            *seen = true;

            assert!(
                !self.entries[index].is_occupied(),
                "vacant stack holds index {index} of an occupied slot"
            );
        }

        for (index, entry) in self.entries.iter().enumerate() {
            assert!(
                entry.is_occupied() || seen_in_stack[index],
                "vacant slot {index} is missing from the vacant stack"
            );

            if self.key_policy == KeyPolicy::Unchecked {
                assert_eq!(
                    entry.generation(),
                    0,
                    "slot {index} has a generation under unchecked keys"
                );
            }
        }

        assert_eq!(
            self.len(),
            self.entries.iter().filter(|entry| entry.is_occupied()).count()
        );
    }
}

impl<T> Default for KeyedPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for KeyedPool<T> {
    fn drop(&mut self) {
        let was_empty = self.is_empty();

        // Drops the remaining items in slot order.
        self.entries.clear();

        // If we are already panicking, we do not want to panic again because that will
        // simply obscure whatever the original panic was, leading to debug difficulties.
        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                was_empty,
                "dropped a non-empty pool of {} with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}

impl<T> Index<Key> for KeyedPool<T> {
    type Output = T;

    fn index(&self, key: Key) -> &Self::Output {
        self.get(key)
    }
}

impl<T> IndexMut<Key> for KeyedPool<T> {
    fn index_mut(&mut self, key: Key) -> &mut Self::Output {
        self.get_mut(key)
    }
}

impl<T> Extend<T> for KeyedPool<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for KeyedPool<T> {
    /// Creates a pool holding the items in iteration order, with keys counting up from zero.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pool = Self::new();
        pool.extend(iter);
        pool
    }
}

impl<T> From<Vec<T>> for KeyedPool<T> {
    /// Creates a pool holding the items of the `Vec`, with the key of each item equal to its
    /// index in the `Vec`.
    fn from(values: Vec<T>) -> Self {
        let mut pool = Self::new();

        pool.entries = values
            .into_iter()
            .map(|value| Entry::Occupied {
                value,
                generation: 0,
            })
            .collect();

        pool
    }
}

impl<T, const N: usize> From<[T; N]> for KeyedPool<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T> IntoIterator for KeyedPool<T> {
    type Item = (Key, T);
    type IntoIter = IntoIter<T>;

    /// Consumes the pool, yielding its items in slot order paired with their keys.
    ///
    /// The items are handed over to the iterator, so the drop policy of the pool does not
    /// apply to them.
    fn into_iter(mut self) -> Self::IntoIter {
        let len = self.len();
        let entries = mem::take(&mut self.entries);
        self.vacant_stack.clear();

        IntoIter::new(entries, len)
    }
}

impl<'p, T> IntoIterator for &'p KeyedPool<T> {
    type Item = (Key, &'p T);
    type IntoIter = Iter<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'p, T> IntoIterator for &'p mut KeyedPool<T> {
    type Item = (Key, &'p mut T);
    type IntoIter = IterMut<'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Display> fmt::Display for KeyedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(' '), f)
    }
}

/// A bidirectional cursor over the items of a [`KeyedPool`].
///
/// The cursor is always positioned either at an occupied slot or at the end position, one past
/// the last slot. Moving the cursor skips vacant slots. Two cursors are equal if they are
/// positioned at the same slot.
///
/// The cursor borrows the pool, so the pool cannot be modified while the cursor exists. Use
/// [`CursorMut`] to modify items while traversing.
///
/// Created by [`KeyedPool::begin()`] and [`KeyedPool::end()`].
///
/// # Example
///
/// ```rust
/// use keyed_pool::KeyedPool;
///
/// let mut pool = KeyedPool::from_iter([1, 2, 3]);
/// pool.remove(pool.keys().nth(1).unwrap());
///
/// let mut cursor = pool.end();
/// let mut backwards = Vec::new();
///
/// while cursor.move_prev() {
///     backwards.push(*cursor.get().unwrap());
/// }
///
/// assert_eq!(backwards, [3, 1]);
/// assert_eq!(cursor, pool.begin());
/// ```
pub struct Cursor<'p, T> {
    pool: &'p KeyedPool<T>,
    index: usize,
}

impl<'p, T> Cursor<'p, T> {
    fn new(pool: &'p KeyedPool<T>, start: usize) -> Self {
        Self {
            pool,
            index: pool.next_occupied_from(start),
        }
    }

    /// The slot index the cursor is positioned at. At the end position, this is the number of
    /// slots in the pool.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor is at the end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index >= self.pool.slot_count()
    }

    /// The key of the item at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<Key> {
        self.get_key_value().map(|(key, _)| key)
    }

    /// The item at the cursor, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&'p T> {
        self.get_key_value().map(|(_, value)| value)
    }

    /// The item at the cursor paired with its key, or `None` at the end position.
    #[must_use]
    pub fn get_key_value(&self) -> Option<(Key, &'p T)> {
        let pool = self.pool;

        pool.entries.get(self.index)?.occupied(self.index)
    }

    /// Moves to the next item, or to the end position if there are no more items.
    ///
    /// Returns whether the cursor is now positioned at an item. At the end position, this does
    /// nothing and returns `false`.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }

        self.index = self.pool.next_occupied_from(
            self.index
                .checked_add(1)
                .expect("index is below the slot count so cannot overflow"),
        );

        !self.is_end()
    }

    /// Moves to the previous item.
    ///
    /// Returns `false` and leaves the cursor in place if there is no item before the cursor.
    pub fn move_prev(&mut self) -> bool {
        match self.pool.prev_occupied_before(self.index) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// A bidirectional cursor with exclusive access to a [`KeyedPool`].
///
/// Moves the same way as [`Cursor`] but additionally allows modifying the item at the cursor
/// and taking it out of the pool.
///
/// Created by [`KeyedPool::cursor_mut()`].
///
/// # Example
///
/// ```rust
/// use keyed_pool::KeyedPool;
///
/// let mut pool = KeyedPool::from_iter([1, 2, 3, 4]);
/// let mut cursor = pool.cursor_mut();
/// let mut taken = Vec::new();
///
/// while let Some(&value) = cursor.get() {
///     if value % 2 == 0 {
///         taken.push(cursor.take_current().unwrap());
///     } else {
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(taken, [2, 4]);
/// assert_eq!(pool.to_string(), "1 3");
/// ```
pub struct CursorMut<'p, T> {
    pool: &'p mut KeyedPool<T>,
    index: usize,
}

impl<T> CursorMut<'_, T> {
    /// The slot index the cursor is positioned at. At the end position, this is the number of
    /// slots in the pool.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor is at the end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index >= self.pool.slot_count()
    }

    /// The key of the item at the cursor, or `None` at the end position.
    #[must_use]
    pub fn key(&self) -> Option<Key> {
        self.pool
            .entries
            .get(self.index)?
            .occupied(self.index)
            .map(|(key, _)| key)
    }

    /// The item at the cursor, or `None` at the end position.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.pool
            .entries
            .get(self.index)?
            .occupied(self.index)
            .map(|(_, value)| value)
    }

    /// The item at the cursor, or `None` at the end position.
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.pool
            .entries
            .get_mut(self.index)?
            .occupied_mut(self.index)
            .map(|(_, value)| value)
    }

    /// Moves to the next item, or to the end position if there are no more items.
    ///
    /// Returns whether the cursor is now positioned at an item.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }

        self.index = self.pool.next_occupied_from(
            self.index
                .checked_add(1)
                .expect("index is below the slot count so cannot overflow"),
        );

        !self.is_end()
    }

    /// Moves to the previous item.
    ///
    /// Returns `false` and leaves the cursor in place if there is no item before the cursor.
    pub fn move_prev(&mut self) -> bool {
        match self.pool.prev_occupied_before(self.index) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Takes the item at the cursor out of the pool and moves the cursor to the next item.
    ///
    /// Returns `None` at the end position.
    #[must_use = "the taken item is dropped if not used"]
    pub fn take_current(&mut self) -> Option<T> {
        let (_, value) = self.pool.vacate(self.index)?;

        self.index = self.pool.next_occupied_from(self.index);

        Some(value)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
