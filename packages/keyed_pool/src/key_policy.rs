use crate::{Key, KeyError, Result};

/// Determines whether a pool detects keys that outlived their item.
///
/// By default, the pool does not validate keys beyond checking that the slot they refer to is
/// occupied. A key whose item was removed therefore refers to whatever item is later inserted
/// into the same slot.
///
/// # Examples
///
/// ```
/// use keyed_pool::{KeyPolicy, KeyedPool};
///
/// let mut pool = KeyedPool::<&str>::builder()
///     .key_policy(KeyPolicy::Checked)
///     .build();
///
/// let old = pool.insert("old");
/// pool.remove(old);
///
/// let new = pool.insert("new");
///
/// // Same slot, different generation.
/// assert_eq!(old.index(), new.index());
/// assert!(!pool.contains(old));
/// assert!(pool.contains(new));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyPolicy {
    /// Keys are plain slot indexes. A stale key silently aliases the item that now occupies its
    /// slot. This is the default.
    #[default]
    Unchecked,

    /// Every slot carries a generation counter that is incremented whenever the slot is vacated.
    /// Keys capture the generation at insertion time and are rejected once it no longer matches.
    ///
    /// The counter is 32 bits wide and wraps around, so a key that outlives four billion
    /// reuses of its slot may be accepted again.
    Checked,
}

impl KeyPolicy {
    /// Verifies that `key` may access an occupied slot whose current generation is
    /// `slot_generation`.
    pub(crate) fn check(self, key: Key, slot_generation: u32) -> Result<()> {
        match self {
            Self::Unchecked => Ok(()),
            Self::Checked if key.generation() == slot_generation => Ok(()),
            Self::Checked => Err(KeyError::Stale {
                index: key.index(),
                key_generation: key.generation(),
                slot_generation,
            }),
        }
    }

    /// The generation a slot receives when it is vacated.
    #[must_use]
    pub(crate) fn next_generation(self, generation: u32) -> u32 {
        match self {
            Self::Unchecked => generation,
            Self::Checked => generation.wrapping_add(1),
        }
    }
}
