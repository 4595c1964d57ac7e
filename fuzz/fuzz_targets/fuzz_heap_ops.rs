//! Fuzz testing for heap operation sequences.
//!
//! This fuzz target drives an 8-ary u16 heap and a 4-ary map through
//! arbitrary push, pop, append, heapify, sort and clear sequences, checking
//! heap order, line-aligned capacity and pop order against a sorted shadow copy.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use lineheap::{Entry, HeapMap, H8};

#[derive(Debug, Arbitrary)]
struct HeapInput {
    operations: Vec<HeapOperation>,
}

#[derive(Debug, Arbitrary)]
enum HeapOperation {
    Push(u16),
    Pop,
    Append(Vec<u16>),
    Heapify,
    Sort,
    Clear,
    PushEntry(u16, u32),
    PopEntry,
}

fn key(v: u16) -> u16 {
    // u16::MAX pads lines and may not be inserted.
    v.min(u16::MAX - 1)
}

fuzz_target!(|input: HeapInput| {
    let mut heap = H8::new();
    let mut shadow: Vec<u16> = Vec::new();
    let mut heap_ordered = true;

    let mut map: HeapMap<u16, u32, 4> = HeapMap::new();
    let mut map_shadow: Vec<(u16, u32)> = Vec::new();

    for op in input.operations.into_iter().take(512) {
        match op {
            HeapOperation::Push(v) if heap_ordered => {
                let v = key(v);
                heap.push(v).unwrap();
                shadow.push(v);
            }
            HeapOperation::Push(_) => {}
            HeapOperation::Pop => {
                if heap_ordered && !shadow.is_empty() {
                    shadow.sort_unstable();
                    let expected = shadow.remove(0);
                    assert_eq!(heap.pop(), expected);
                }
            }
            HeapOperation::Append(values) => {
                let values: Vec<u16> = values.into_iter().take(256).map(key).collect();
                heap.append(values.iter().copied()).unwrap();
                shadow.extend_from_slice(&values);
                heap_ordered = values.is_empty() && heap_ordered;
            }
            HeapOperation::Heapify => {
                heap.heapify();
                heap_ordered = true;
            }
            HeapOperation::Sort => {
                if heap_ordered {
                    let n = heap.size();
                    heap.sort();
                    assert_eq!(heap.size(), 0);
                    assert!(heap.is_sorted(n));
                    shadow.clear();
                }
            }
            HeapOperation::Clear => {
                heap.clear();
                shadow.clear();
                heap_ordered = true;
                assert_eq!(heap.capacity(), 0);
            }
            HeapOperation::PushEntry(k, p) => {
                let k = key(k);
                map.push(k, p).unwrap();
                map_shadow.push((k, p));
            }
            HeapOperation::PopEntry => {
                if !map.is_empty() {
                    let (k, p) = map.pop_entry().into_parts();
                    let min = map_shadow.iter().map(|&(k, _)| k).min().unwrap();
                    assert_eq!(k, min);
                    let at = map_shadow.iter().position(|&e| e == (k, p)).unwrap();
                    map_shadow.swap_remove(at);
                }
            }
        }

        assert_eq!(heap.size(), shadow.len());
        assert!(heap.capacity() >= heap.size());
        assert_eq!(heap.capacity() % 8, 0);
        if heap_ordered {
            assert!(heap.is_heap());
        }
        assert!(map.is_heap());
        assert_eq!(map.size(), map_shadow.len());
    }

    if map.size() > 0 {
        assert_eq!(map.top_entry().key, map_shadow.iter().map(|&(k, _)| k).min().unwrap());
        let top: Entry<u16, u32> = map.top_entry();
        assert!(map_shadow.contains(&top.into_parts()));
    }
});
