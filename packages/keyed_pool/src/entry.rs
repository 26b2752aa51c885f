use crate::{Key, KeyError, KeyPolicy, Result};

/// One slot of the backing storage of a [`KeyedPool`][crate::KeyedPool].
///
/// Both variants carry the slot generation so that it survives the slot being vacated. The
/// generation only ever changes under [`KeyPolicy::Checked`].
#[derive(Clone, Debug)]
pub(crate) enum Entry<T> {
    Occupied { value: T, generation: u32 },

    Vacant { generation: u32 },
}

impl<T> Entry<T> {
    #[must_use]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    #[must_use]
    pub(crate) fn generation(&self) -> u32 {
        match self {
            Self::Occupied { generation, .. } | Self::Vacant { generation } => *generation,
        }
    }

    /// Returns the value if `key` is allowed to access it under `policy`.
    pub(crate) fn value(&self, key: Key, policy: KeyPolicy) -> Result<&T> {
        match self {
            Self::Occupied { value, generation } => policy.check(key, *generation).map(|()| value),
            Self::Vacant { .. } => Err(KeyError::Vacant { index: key.index() }),
        }
    }

    /// Returns the value if `key` is allowed to access it under `policy`.
    pub(crate) fn value_mut(&mut self, key: Key, policy: KeyPolicy) -> Result<&mut T> {
        match self {
            Self::Occupied { value, generation } => policy.check(key, *generation).map(|()| value),
            Self::Vacant { .. } => Err(KeyError::Vacant { index: key.index() }),
        }
    }

    /// Pairs the value with the key of the slot, if the slot at `index` is occupied.
    #[must_use]
    pub(crate) fn occupied(&self, index: usize) -> Option<(Key, &T)> {
        match self {
            Self::Occupied { value, generation } => Some((Key::new(index, *generation), value)),
            Self::Vacant { .. } => None,
        }
    }

    #[must_use]
    pub(crate) fn occupied_mut(&mut self, index: usize) -> Option<(Key, &mut T)> {
        match self {
            Self::Occupied { value, generation } => Some((Key::new(index, *generation), value)),
            Self::Vacant { .. } => None,
        }
    }

    #[must_use]
    pub(crate) fn into_occupied(self, index: usize) -> Option<(Key, T)> {
        match self {
            Self::Occupied { value, generation } => Some((Key::new(index, generation), value)),
            Self::Vacant { .. } => None,
        }
    }
}
