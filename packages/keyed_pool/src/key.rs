/// A key that can be used to reference an item in a [`KeyedPool`][crate::KeyedPool].
///
/// Keys are opaque handles returned by [`KeyedPool::insert()`][1] and related methods. They
/// provide efficient access to items in the pool via [`KeyedPool::get()`][2] and
/// [`KeyedPool::get_mut()`][3].
///
/// # Key reuse
///
/// The slot of a removed item is reused by the next inserted item, and so is its key. With the
/// default [`KeyPolicy::Unchecked`][4], using a key after its item has been removed may silently
/// access a different item that has since been inserted into the same slot. With
/// [`KeyPolicy::Checked`][5], such a stale key is rejected instead.
///
/// # Example
///
/// ```rust
/// use keyed_pool::{Key, KeyedPool};
///
/// let mut pool = KeyedPool::<i32>::new();
///
/// let key1 = pool.insert(42);
/// let key2 = pool.insert(24);
///
/// // Under the default policy, keys are plain slot indexes.
/// assert_eq!(key1.index(), 0);
/// assert_eq!(key2, Key::from_index(1));
///
/// // Keys can be copied and stored.
/// let stored_keys = vec![key1, key2];
///
/// for &key in &stored_keys {
///     println!("Item: {}", pool[key]);
/// }
/// ```
///
/// [1]: crate::KeyedPool::insert
/// [2]: crate::KeyedPool::get
/// [3]: crate::KeyedPool::get_mut
/// [4]: crate::KeyPolicy::Unchecked
/// [5]: crate::KeyPolicy::Checked
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Key {
    index: usize,

    /// Generation of the slot at the time the key was issued. Always zero unless the pool uses
    /// generation-checked keys.
    generation: u32,
}

impl Key {
    #[must_use]
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Creates a key that refers to the slot at `index`.
    ///
    /// This is the inverse of [`index()`][Self::index] for pools that use
    /// [`KeyPolicy::Unchecked`][crate::KeyPolicy::Unchecked]. A pool that uses
    /// [`KeyPolicy::Checked`][crate::KeyPolicy::Checked] only accepts such a key while the slot
    /// has never been vacated.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::new(index, 0)
    }

    /// The index of the slot this key refers to.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::from_index(index)
    }
}
