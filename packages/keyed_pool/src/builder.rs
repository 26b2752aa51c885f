use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DropPolicy, KeyPolicy, KeyedPool};

/// Builder for creating an instance of [`KeyedPool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`KeyedPool::new()`][1] is sufficient for most use cases.
///
/// # Examples
///
/// ```
/// use keyed_pool::{DropPolicy, KeyPolicy, KeyedPool};
///
/// let pool = KeyedPool::<u32>::builder()
///     .capacity(100)
///     .key_policy(KeyPolicy::Checked)
///     .drop_policy(DropPolicy::MayDropItems)
///     .build();
///
/// assert!(pool.slots_capacity() >= 100);
/// assert!(pool.stack_capacity() >= 50);
/// ```
///
/// [1]: KeyedPool::new
#[must_use]
pub struct KeyedPoolBuilder<T> {
    capacity: usize,
    key_policy: KeyPolicy,
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for KeyedPoolBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &self.capacity)
            .field("key_policy", &self.key_policy)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T> KeyedPoolBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            key_policy: KeyPolicy::default(),
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Reserves room for `capacity` items up front.
    ///
    /// The pool also reserves room for `capacity / 2` (rounded down) entries in its stack of
    /// vacated slots, anticipating that roughly half of the items churn. Reservation only
    /// affects capacity; the pool still starts out empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_pool::KeyedPool;
    ///
    /// let pool = KeyedPool::<u64>::builder().capacity(10).build();
    ///
    /// assert!(pool.is_empty());
    /// assert!(pool.slots_capacity() >= 10);
    /// assert!(pool.stack_capacity() >= 5);
    /// ```
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the [key policy][KeyPolicy] for the pool. This governs whether keys that outlived
    /// their item are detected.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_pool::{KeyPolicy, KeyedPool};
    ///
    /// let pool = KeyedPool::<u32>::builder()
    ///     .key_policy(KeyPolicy::Checked)
    ///     .build();
    ///
    /// assert_eq!(pool.key_policy(), KeyPolicy::Checked);
    /// ```
    pub fn key_policy(mut self, policy: KeyPolicy) -> Self {
        self.key_policy = policy;
        self
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how
    /// to treat remaining items in the pool when the pool is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_pool::{DropPolicy, KeyedPool};
    ///
    /// let pool = KeyedPool::<u32>::builder()
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    /// ```
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds the pool with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_pool::KeyedPool;
    ///
    /// let pool = KeyedPool::<u32>::builder().build();
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn build(self) -> KeyedPool<T> {
        KeyedPool::new_inner(self.capacity, self.key_policy, self.drop_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new() {
        let pool = KeyedPoolBuilder::<String>::new().build();

        assert_eq!(pool.key_policy(), KeyPolicy::Unchecked);
        assert_eq!(pool.drop_policy(), DropPolicy::MayDropItems);
        assert_eq!(pool.slots_capacity(), 0);
        assert_eq!(pool.stack_capacity(), 0);
    }

    #[test]
    fn debug_mentions_item_type() {
        let builder = KeyedPoolBuilder::<u16>::new().capacity(7);

        let text = format!("{builder:?}");
        assert!(text.contains("u16"));
        assert!(text.contains("capacity: 7"));
    }
}
