use std::any::type_name;
use std::fmt::{self, Write};

use crate::KeyedPool;

/// Renders the items of a [`KeyedPool`] in slot order, separated by a configurable character.
///
/// This is a convenience for logging and debugging, not a serialization format; there is no
/// way to parse the output back into a pool.
///
/// Created by [`KeyedPool::display()`].
pub struct DisplayValues<'p, T> {
    pool: &'p KeyedPool<T>,
    separator: char,
}

impl<'p, T> DisplayValues<'p, T> {
    pub(crate) fn new(pool: &'p KeyedPool<T>, separator: char) -> Self {
        Self { pool, separator }
    }
}

impl<T: fmt::Display> fmt::Display for DisplayValues<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, value) in self.pool.values().enumerate() {
            if position > 0 {
                f.write_char(self.separator)?;
            }

            fmt::Display::fmt(value, f)?;
        }

        Ok(())
    }
}

impl<T> fmt::Debug for DisplayValues<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}
