use thiserror::Error;

/// Reasons why a [`Key`][crate::Key] could not be used to access an item in a
/// [`KeyedPool`][crate::KeyedPool].
///
/// Returned by the fallible lookup methods such as [`KeyedPool::try_get()`][1]. The
/// non-failing operations ([`contains()`][2], [`remove()`][3], [`take()`][4]) collapse all of
/// these into a `bool` or `Option`.
///
/// [1]: crate::KeyedPool::try_get
/// [2]: crate::KeyedPool::contains
/// [3]: crate::KeyedPool::remove
/// [4]: crate::KeyedPool::take
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// The key refers to a slot that the pool has never allocated.
    #[error("key index {index} is out of range of the {slot_count} slots in the pool")]
    OutOfRange {
        /// The slot index of the key.
        index: usize,

        /// The number of slots in the pool at the time of the lookup.
        slot_count: usize,
    },

    /// The key refers to a slot that is currently vacant.
    #[error("key index {index} refers to a vacant slot")]
    Vacant {
        /// The slot index of the key.
        index: usize,
    },

    /// The key refers to an occupied slot but was issued for an earlier occupant of that slot.
    /// Only reported by pools that use [`KeyPolicy::Checked`][crate::KeyPolicy::Checked].
    #[error(
        "key index {index} is stale: key generation {key_generation} does not match slot generation {slot_generation}"
    )]
    Stale {
        /// The slot index of the key.
        index: usize,

        /// The slot generation captured in the key.
        key_generation: u32,

        /// The current generation of the slot.
        slot_generation: u32,
    },
}

/// A specialized `Result` type for key lookups, returning the crate's [`KeyError`] type as the
/// error value.
pub(crate) type Result<T> = std::result::Result<T, KeyError>;
