//! # Heap Map Integration Tests
//!
//! Entry adapter behaviour: ordering by key alone, payload fidelity, and the
//! sort contract, run against several key types and arities.
//!
//! ## Usage
//!
//! ```sh
//! cargo test --test heap_map
//! ```

use std::collections::HashMap;

use lineheap::{Descending, Entry, HeapMap, HeapMap8, U48};

fn u48(v: u64) -> U48 {
    U48::new(v).unwrap()
}

mod scenarios {
    use super::*;

    #[test]
    fn clear_resets_size() {
        let mut map: HeapMap8<U48, u16> = HeapMap8::new();
        assert_eq!(map.size(), 0);
        map.push(u48(1), 100).unwrap();
        assert_eq!(map.size(), 1);
        map.clear();
        assert_eq!(map.size(), 0);
        assert_eq!(map.capacity(), 0);
    }

    #[test]
    fn push_three_keeps_minimum_on_top() {
        let mut map: HeapMap8<U48, u16> = HeapMap8::new();
        let p1 = Entry::new(u48(1), 100);
        let p2 = Entry::new(u48(2), 200);
        let p3 = Entry::new(u48(3), 300);
        assert!(map.is_heap());

        map.push_entry(p2).unwrap();
        assert_eq!(map.size(), 1);
        assert_eq!(map.top_entry(), p2);
        assert!(map.is_heap());

        map.push_entry(p1).unwrap();
        assert_eq!(map.size(), 2);
        assert_eq!(map.top_entry(), p1);
        assert!(map.is_heap());

        map.push_entry(p3).unwrap();
        assert_eq!(map.size(), 3);
        assert_eq!(map.top_entry(), p1);
        assert!(map.is_heap());
    }

    #[test]
    fn heapify_three_pops_in_key_order() {
        let mut map: HeapMap8<U48, u16> = HeapMap8::new();
        let p1 = Entry::new(u48(1), 41);
        let p2 = Entry::new(u48(2), 42);
        let p3 = Entry::new(u48(3), 43);
        map.append_entries([p2, p1, p3]).unwrap();
        assert_eq!(map.size(), 3);

        map.heapify();
        assert!(map.is_heap());
        assert_eq!(map.pop_entry(), p1);
        assert_eq!(map.pop_entry(), p2);
        assert_eq!(map.pop_entry(), p3);
    }

    #[test]
    fn sort_three_reads_back_descending() {
        let mut map: HeapMap8<U48, u16> = HeapMap8::new();
        let p1 = Entry::new(u48(1), 41);
        let p2 = Entry::new(u48(2), 42);
        let p3 = Entry::new(u48(3), 43);
        map.append_entries([p2, p1, p3]).unwrap();
        map.heapify();
        map.sort();

        assert_eq!(map.size(), 0);
        assert_eq!(map.entry(0), p3);
        assert_eq!(map.entry(1), p2);
        assert_eq!(map.entry(2), p1);
        assert!(map.is_sorted(3));
    }

    #[test]
    fn heapify_hundred_descending_keys() {
        let count: u64 = 100;
        let mut map: HeapMap8<U48, u64> = HeapMap8::new();
        map.append_entries((0..count).map(|i| {
            let j = count - 1 - i;
            Entry::new(u48(j), 40 + j)
        }))
        .unwrap();
        assert_eq!(map.size(), 100);
        // Before heapify the root line holds keys 99..=92.
        assert!(map.top_entry().key >= u48(count - 8));

        map.heapify();
        assert!(map.is_heap());
        assert_eq!(map.top_entry(), Entry::new(u48(0), 40));
        for i in 0..count {
            assert_eq!(map.pop_entry(), Entry::new(u48(i), i + 40));
        }
        assert!(map.is_empty());
    }
}

mod payloads {
    use super::*;

    #[test]
    fn duplicate_keys_return_every_payload_once() {
        let mut map: HeapMap<u32, u32, 4> = HeapMap::new();
        let mut expected: HashMap<u32, Vec<u32>> = HashMap::new();
        for i in 0..300u32 {
            let key = (i * 37) % 23;
            map.push(key, i).unwrap();
            expected.entry(key).or_default().push(i);
            assert!(map.is_heap());
        }

        let mut last_key = 0;
        let mut seen: HashMap<u32, Vec<u32>> = HashMap::new();
        while !map.is_empty() {
            let (key, payload) = map.pop_entry().into_parts();
            assert!(key >= last_key);
            last_key = key;
            seen.entry(key).or_default().push(payload);
        }

        for payloads in expected.values_mut().chain(seen.values_mut()) {
            payloads.sort_unstable();
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn set_entry_then_pull_up() {
        let mut map: HeapMap8<u16, i64> = HeapMap8::new();
        map.append_entries((10..60u16).map(|k| Entry::new(k, -i64::from(k))))
            .unwrap();
        map.heapify();

        let last = map.size() - 1;
        let moved = Entry::new(1, -1);
        map.set_entry(last, moved);
        map.pull_up(moved, last);
        assert!(map.is_heap());
        assert_eq!(map.pop_entry(), moved);
    }

    #[test]
    fn tuple_conversions() {
        let entry: Entry<u16, &str> = (7, "seven").into();
        let (k, p): (u16, &str) = entry.into();
        assert_eq!((k, p), (7, "seven"));
    }
}

mod ordering {
    use super::*;

    #[test]
    fn descending_map_sorts_ascending_in_storage() {
        let mut map: HeapMap<u16, u8, 8, Descending> = HeapMap::new();
        map.append_entries((1..=20u16).map(|k| Entry::new(k, k as u8)))
            .unwrap();
        map.heapify();
        assert_eq!(map.top_entry(), Entry::new(20, 20));

        map.sort();
        assert!(map.is_sorted(20));
        assert_eq!(map.entry(0), Entry::new(1, 1));
        assert_eq!(map.entry(19), Entry::new(20, 20));
    }
}
