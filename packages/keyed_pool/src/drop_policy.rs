/// Determines item dropping behavior when the pool is dropped.
///
/// By default, the pool will drop its items when it is dropped.
///
/// # Examples
///
/// ```
/// use keyed_pool::{DropPolicy, KeyedPool};
///
/// // The drop policy is set at pool creation time.
/// let pool = KeyedPool::<u32>::builder()
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build();
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// The pool will drop its items when the pool is dropped. This is the default.
    #[default]
    MayDropItems,

    /// The pool will panic if it still contains items when it is dropped.
    ///
    /// This may be valuable if every item is expected to be explicitly taken back out of the
    /// pool, for example because the items represent resources that need orderly release.
    MustNotDropItems,
}
