//! Traversing a `KeyedPool` that has vacant slots, with iterators and with cursors.

use keyed_pool::KeyedPool;

fn main() {
    let mut nums = KeyedPool::from_iter([1, 2, 4, 8, 16]);
    let fruits = KeyedPool::from_iter(["orange", "apple", "raspberry"]);
    let empty = KeyedPool::<char>::new();

    // Traversal steps over vacant slots, which is usually as cheap as iterating a `Vec`.
    let four = nums.keys().nth(2).expect("pool was built with five items");
    nums.remove(four);

    println!("Nums: {nums}");
    println!("Sum of nums: {}", nums.values().sum::<i32>());

    if let Some(first) = fruits.begin().get() {
        println!("First fruit: {first}");
    }

    // Cursors move in both directions.
    let mut cursor = fruits.end();
    while cursor.move_prev() {
        if let Some((key, fruit)) = cursor.get_key_value() {
            println!("Fruit at slot {}: {fruit}", key.index());
        }
    }

    if empty.begin() == empty.end() {
        println!("Pool 'empty' is indeed empty.");
    }
}
