//! Integration tests for the `keyed_pool` package.
//!
//! These exercise the public API only: key reuse, the ownership contract of insert/take/remove,
//! traversal over pools with vacant slots and the checked key policy.

use std::cell::Cell;
use std::rc::Rc;

use keyed_pool::{DropPolicy, Key, KeyError, KeyPolicy, KeyedPool};

#[test]
fn vacant_slots_form_a_stack() {
    let mut pool = KeyedPool::new();
    let a = pool.insert("a");
    let b = pool.insert("b");
    let c = pool.insert("c");

    // Vacate in the order a, b, c so that c is on top.
    assert!(pool.remove(a));
    assert!(pool.remove(b));
    assert!(pool.remove(c));
    assert!(pool.is_empty());

    assert_eq!(pool.vacant_key(), c);
    assert_eq!(pool.insert("x"), c);

    assert_eq!(pool.vacant_key(), b);
    assert_eq!(pool.len(), 1);
}

#[test]
fn len_tracks_inserts_minus_successful_removals() {
    let mut pool = KeyedPool::new();
    let mut expected = 0_usize;

    let keys = (0..20).map(|i| pool.insert(i)).collect::<Vec<_>>();
    expected += keys.len();
    assert_eq!(pool.len(), expected);

    for key in keys.iter().step_by(3) {
        assert!(pool.remove(*key));
        expected -= 1;
        assert_eq!(pool.len(), expected);
    }

    for key in keys.iter().skip(1).step_by(3) {
        assert!(pool.take(*key).is_some());
        expected -= 1;
        assert_eq!(pool.len(), expected);
    }

    // Already vacated, so these change nothing.
    for key in keys.iter().step_by(3) {
        assert!(!pool.remove(*key));
        assert_eq!(pool.len(), expected);
    }

    for i in 0..5 {
        pool.insert(100 + i);
        expected += 1;
        assert_eq!(pool.len(), expected);
    }
}

#[test]
fn take_returns_inserted_value() {
    let mut pool = KeyedPool::new();
    let key = pool.insert(vec![1, 2, 3]);

    assert_eq!(pool.take(key), Some(vec![1, 2, 3]));
    assert!(!pool.contains(key));
}

#[test]
fn remove_is_idempotent() {
    let mut pool = KeyedPool::from_iter(['p', 'q']);
    let key = Key::from_index(1);

    assert!(pool.remove(key));
    assert!(!pool.remove(key));
    assert_eq!(pool.len(), 1);
}

#[test]
fn reused_slot_keeps_its_position_in_traversal() {
    let mut pool = KeyedPool::new();
    pool.insert(1);
    let two = pool.insert(2);
    pool.insert(3);

    pool.remove(two);
    pool.insert(4);

    assert_eq!(pool.values().copied().collect::<Vec<_>>(), [1, 4, 3]);

    let mut cursor = pool.begin();
    let mut forward = Vec::new();
    while let Some(value) = cursor.get() {
        forward.push(*value);
        cursor.move_next();
    }
    assert_eq!(forward, [1, 4, 3]);
}

#[test]
fn far_out_of_range_keys_are_rejected_quietly() {
    let mut pool = KeyedPool::from_iter([1_u8, 2, 3]);
    let far = Key::from_index(usize::MAX - 1);

    assert!(!pool.contains(far));
    assert!(!pool.remove(far));
    assert_eq!(pool.take(far), None);
    assert!(matches!(
        pool.try_get(far),
        Err(KeyError::OutOfRange { slot_count: 3, .. })
    ));
    assert_eq!(pool.len(), 3);
}

#[test]
fn growth_beyond_reserved_capacity_preserves_keys() {
    let capacity = 16;
    let mut pool = KeyedPool::with_capacity(capacity);
    let initial_capacity = pool.slots_capacity();

    let keys = (0..=capacity)
        .map(|i| pool.insert(format!("item {i}")))
        .collect::<Vec<_>>();

    assert!(initial_capacity >= capacity);
    assert!(pool.slots_capacity() > initial_capacity);
    assert_eq!(pool.len(), capacity + 1);

    for (i, key) in keys.iter().enumerate() {
        assert_eq!(pool[*key], format!("item {i}"));
    }
}

#[test]
fn empty_pool_begin_is_end() {
    let pool = KeyedPool::<String>::new();

    assert_eq!(pool.begin(), pool.end());
    assert_eq!(pool.iter().next(), None);
    assert_eq!(pool.to_string(), "");
}

#[test]
fn batch_construction_assigns_keys_in_order() {
    let pool = KeyedPool::from(["zero", "one", "two"]);

    assert_eq!(
        pool.iter().collect::<Vec<_>>(),
        [
            (Key::from_index(0), &"zero"),
            (Key::from_index(1), &"one"),
            (Key::from_index(2), &"two"),
        ]
    );
    assert!(pool.slots_capacity() >= 3);
}

#[test]
fn checked_keys_reject_recycled_slots() {
    let mut pool = KeyedPool::builder()
        .key_policy(KeyPolicy::Checked)
        .capacity(4)
        .build();

    let first = pool.insert(String::from("first"));
    assert_eq!(pool.take(first).as_deref(), Some("first"));

    let second = pool.insert(String::from("second"));
    assert_eq!(second.index(), first.index());

    assert!(!pool.contains(first));
    assert!(matches!(pool.try_get(first), Err(KeyError::Stale { .. })));
    assert!(!pool.remove(first));
    assert_eq!(pool[second], "second");

    assert!(pool.remove(second));
    let third = pool.insert(String::from("third"));

    assert!(!pool.contains(first));
    assert!(!pool.contains(second));
    assert!(pool.contains(third));
}

#[test]
fn unchecked_keys_alias_recycled_slots() {
    let mut pool = KeyedPool::new();

    let first = pool.insert(1);
    pool.remove(first);
    let second = pool.insert(2);

    assert_eq!(first, second);
    assert_eq!(pool[first], 2);
}

#[test]
fn items_are_dropped_once() {
    struct Tracked(Rc<Cell<u32>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let drops = Rc::new(Cell::new(0));
    let mut pool = KeyedPool::new();

    let keys = (0..6)
        .map(|_| pool.insert(Tracked(Rc::clone(&drops))))
        .collect::<Vec<_>>();

    pool.remove(keys[0]);
    assert_eq!(drops.get(), 1);

    let taken = pool.take(keys[1]).unwrap();
    assert_eq!(drops.get(), 1);
    drop(taken);
    assert_eq!(drops.get(), 2);

    pool.retain(|key, _| key != keys[2]);
    assert_eq!(drops.get(), 3);

    drop(pool);
    assert_eq!(drops.get(), 6);
}

#[test]
#[should_panic]
fn dropping_non_empty_pool_panics_under_must_not_drop_items() {
    let mut pool = KeyedPool::builder()
        .drop_policy(DropPolicy::MustNotDropItems)
        .build();

    pool.insert(1);
}

#[test]
fn display_joins_items_with_separator() {
    let pool = KeyedPool::from_iter(["orange", "apple", "raspberry"]);

    assert_eq!(format!("{pool}"), "orange apple raspberry");
    assert_eq!(format!("{}", pool.display('\n')), "orange\napple\nraspberry");
}
