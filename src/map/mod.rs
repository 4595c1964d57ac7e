//! # Heap Map
//!
//! `HeapMap<K, P, D, O>` gives the line heap map-like semantics for
//! scheduler workloads (Dijkstra frontiers, event queues): each key carries
//! an opaque payload, values come out ordered by key, and the payload is
//! returned exactly as it went in.
//!
//! ## Design
//!
//! The map is a thin layer over `Heap<Entry<K, P>, D, ByKey<O>>`. `ByKey`
//! extracts `Entry::key` for every comparison, so the engine moves payloads
//! along with their keys but never reads them. Every engine operation has a
//! one-to-one counterpart here that takes or returns entries.
//!
//! ## Ordering Customization
//!
//! `O` is any key order: `Ascending` (default, smallest key first) or
//! `Descending` (largest key first). The key that order uses as padding
//! (`Key::SENTINEL` or `Key::FLOOR`) must not be inserted.
//!
//! ## Usage
//!
//! ```
//! use lineheap::{Entry, HeapMap};
//!
//! let mut events: HeapMap<u32, &str> = HeapMap::new();
//! events.push(30, "flush")?;
//! events.push(10, "tick")?;
//! events.push(20, "poll")?;
//!
//! assert_eq!(events.pop_entry(), Entry::new(10, "tick"));
//! assert_eq!(events.top_entry(), Entry::new(20, "poll"));
//! # Ok::<(), eyre::Report>(())
//! ```

use eyre::Result;

use crate::config::DEFAULT_ARITY;
use crate::heap::Heap;
use crate::line::{Ascending, ByKey, LineOrder};
use crate::types::{Entry, Key};

/// Priority queue of `(key, payload)` entries ordered by key alone.
///
/// Line scans run the key order's minpos over the entries' keys, so `u16`
/// keys get the vector kernels just as a plain `Heap<u16>` does.
///
/// `P` must be `Copy + Default`. Slots past the logical end hold padding
/// entries, `(padding key, P::default())`; that default payload is never
/// returned and never compared, but the type has to be able to produce one.
pub struct HeapMap<K, P, const D: usize = DEFAULT_ARITY, O = Ascending> {
    heap: Heap<Entry<K, P>, D, ByKey<O>>,
}

impl<K, P, const D: usize, O> HeapMap<K, P, D, O>
where
    K: Key,
    P: Copy + Default,
    O: LineOrder<K>,
{
    pub fn new() -> Self {
        Self { heap: Heap::new() }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.heap.size()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Entry at flat index `i`, anywhere below `capacity()`. After `sort()`
    /// this reads the sorted output.
    #[inline]
    pub fn entry(&self, i: usize) -> Entry<K, P> {
        self.heap.get(i)
    }

    /// Overwrites flat index `i` without restoring heap order.
    #[inline]
    pub fn set_entry(&mut self, i: usize, entry: Entry<K, P>) {
        self.heap.set(i, entry);
    }

    /// Grows the map by `n` padding entries and returns them for the caller
    /// to fill. Call `heapify()` afterwards.
    pub fn extend(&mut self, n: usize) -> Result<&mut [Entry<K, P>]> {
        self.heap.extend(n)
    }

    /// Appends entries in iteration order without restoring heap order.
    pub fn append_entries<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = Entry<K, P>>,
    {
        self.heap.append(entries)
    }

    pub fn pull_up(&mut self, entry: Entry<K, P>, q: usize) {
        self.heap.pull_up(entry, q);
    }

    pub fn push_down(&mut self, entry: Entry<K, P>, p: usize) {
        self.heap.push_down(entry, p);
    }

    pub fn heapify(&mut self) {
        self.heap.heapify();
    }

    pub fn is_heap(&self) -> bool {
        self.heap.is_heap()
    }

    pub fn push_entry(&mut self, entry: Entry<K, P>) -> Result<()> {
        self.heap.push(entry)
    }

    pub fn push(&mut self, key: K, payload: P) -> Result<()> {
        self.heap.push(Entry::new(key, payload))
    }

    /// Entry with the first key in order. The map must not be empty.
    pub fn top_entry(&self) -> Entry<K, P> {
        self.heap.top()
    }

    /// Removes the entry with the first key in order. The map must not be
    /// empty. Among equal keys the payload returned first is unspecified.
    pub fn pop_entry(&mut self) -> Entry<K, P> {
        self.heap.pop()
    }

    /// Sorts in place: afterwards `entry(0..n)` runs from the last key in
    /// order to the first, and `size() == 0`.
    pub fn sort(&mut self) {
        self.heap.sort();
    }

    pub fn is_sorted(&self, n: usize) -> bool {
        self.heap.is_sorted(n)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<K, P, const D: usize, O> Default for HeapMap<K, P, D, O>
where
    K: Key,
    P: Copy + Default,
    O: LineOrder<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, const D: usize, O> std::fmt::Debug for HeapMap<K, P, D, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapMap").field("heap", &self.heap).finish()
    }
}
