//! Basic usage of the `keyed_pool` crate:
//!
//! * Creating a pool.
//! * Adding items.
//! * Retrieving items.
//! * Removing and taking back items.

use keyed_pool::KeyedPool;

fn main() {
    let mut pool = KeyedPool::<String>::with_capacity(4);

    // Inserting an item gives you a key that you can later use to look up the item again.
    let alice_key = pool.insert("Alice".to_string());
    let bob_key = pool.insert("Bob".to_string());
    let charlie_key = pool.insert("Charlie".to_string());

    println!(
        "Pool contains {} items, with room for {} before growing",
        pool.len(),
        pool.slots_capacity()
    );

    // Retrieving items from a pool is fast, similar to `Vec[index]`.
    println!("Retrieved item: {}", pool[alice_key]);

    pool.remove(bob_key);

    // Taking an item hands ownership back to you instead of dropping it.
    let charlie = pool.take(charlie_key);
    println!("Took back: {charlie:?}");

    // The most recently vacated slot is reused first, so Dave gets Charlie's old key.
    let dave_key = pool.insert("Dave".to_string());
    assert_eq!(dave_key, charlie_key);

    // You can also modify the items in-place.
    pool.get_mut(alice_key).push_str(" Smith");

    println!("Pool now contains: {}", pool.display(','));
}
