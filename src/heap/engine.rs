//! # Line Heap Engine
//!
//! `Heap<V, D, O>` is an implicit D-ary min-heap whose storage is a vector
//! of lines. The flat index of a value is its position in the flattened
//! array of lines.
//!
//! ## Tree Shape
//!
//! The root line (flat 0..D) holds up to D roots; the root of the heap is
//! the minpos of that line. Every other flat slot `p` owns exactly one
//! children line:
//!
//! ```text
//! children(p) = (p + 1) * D        first slot of p's children line
//! parent(q)   = q / D - 1          q is any slot of a non-root line
//!
//! D = 8:
//! line 0:  [ 0  1  2  3  4  5  6  7]
//! line 1:  [ 8 .. 15]   children of slot 0
//! line 2:  [16 .. 23]   children of slot 1
//! ...
//! line 9:  [72 .. 79]   children of slot 8
//! ```
//!
//! ## Invariants
//!
//! 1. Heap order: for every non-root line starting at `q`,
//!    `minpos(line q)` does not sort before the value at `parent(q)`.
//! 2. Padding: every flat slot at or past `size` holds `O::padding()`,
//!    except the sorted residue a `sort()` leaves behind (see below).
//! 3. Slots `[0, size)` hold exactly the values logically present; order
//!    within a line is unconstrained.
//!
//! ## Sorted Residue
//!
//! `sort()` pops everything and writes the popped values back, largest
//! first, so the storage reads non-increasing by index while `size() == 0`.
//! The data stays readable through `get`/`Index` until the next growth,
//! which re-pads it before handing out any slot.
//!
//! ## Trust Boundary
//!
//! Only growth can fail, and it reports [`AllocError`] through `eyre`.
//! `top`/`pop` on an empty heap and `pull_up`/`push_down` positions past
//! `size` are contract violations: they are `debug_assert!`ed and produce
//! unspecified (but memory safe) results in release builds. Indices past
//! the allocated capacity panic on the slice bounds check.
//!
//! ## Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `push` | amortized O(1) growth + O(log_D n) |
//! | `pop` | O(log_D n) minpos calls |
//! | `heapify` | O(n) |
//! | `is_heap` | O(n / D) minpos calls |
//! | `sort` | O(n log_D n) |

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use eyre::{bail, Result};
use tracing::{debug, trace};

use super::error::{AllocError, AllocErrorKind};
use crate::config::DEFAULT_ARITY;
use crate::line::{Ascending, Line, LineOrder};

/// Growable D-ary heap stored as whole lines.
pub struct Heap<V, const D: usize = DEFAULT_ARITY, O = Ascending> {
    lines: Vec<Line<V, D>>,
    size: usize,
    /// Flat slots `[size, residue)` still hold the output of `sort()`.
    residue: usize,
    _order: PhantomData<fn() -> O>,
}

impl<V, const D: usize, O> Heap<V, D, O>
where
    V: Copy,
    O: LineOrder<V>,
{
    /// The arity. Evaluating it fails the build unless `D` is a power of
    /// two greater than 1.
    pub const ARITY: usize = {
        assert!(
            D > 1 && D.is_power_of_two(),
            "heap arity must be a power of two greater than 1"
        );
        D
    };

    /// Largest representable logical size: `usize::MAX` aligned down to D.
    pub const SIZE_MAX: usize = usize::MAX & !(Self::ARITY - 1);

    pub fn new() -> Self {
        let _ = Self::ARITY;
        Self {
            lines: Vec::new(),
            size: 0,
            residue: 0,
            _order: PhantomData,
        }
    }

    #[inline]
    fn parent(q: usize) -> usize {
        q / Self::ARITY - 1
    }

    #[inline]
    fn children(p: usize) -> usize {
        (p + 1) * Self::ARITY
    }

    #[inline]
    fn slot(&self, i: usize) -> V {
        self.lines[i / D][i % D]
    }

    #[inline]
    fn set_slot(&mut self, i: usize, value: V) {
        self.lines[i / D][i % D] = value;
    }

    /// Number of values logically in the heap.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated slots, always a whole number of lines.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.lines.len() * D
    }

    /// Value at flat index `i`, which may lie anywhere below `capacity()`.
    #[inline]
    pub fn get(&self, i: usize) -> V {
        self.slot(i)
    }

    /// Overwrites flat index `i` without restoring heap order.
    #[inline]
    pub fn set(&mut self, i: usize, value: V) {
        self.set_slot(i, value);
    }

    /// The logically present values, `[0, size)`, in storage order.
    pub fn as_slice(&self) -> &[V] {
        &self.lines.as_flattened()[..self.size]
    }

    /// Ensures storage for `n` more values and returns the new logical size.
    /// Does not change `size`.
    fn grow(&mut self, n: usize) -> Result<usize> {
        if n > Self::SIZE_MAX - self.size {
            debug!(
                current = self.size,
                requested = n,
                kind = AllocErrorKind::Overflow.name(),
                "heap growth rejected"
            );
            bail!(AllocError {
                kind: AllocErrorKind::Overflow,
                current: self.size,
                requested: n,
            });
        }

        let new_size = self.size + n;
        let needed = new_size.div_ceil(D);
        if needed > self.lines.len() {
            if let Err(e) = self.lines.try_reserve(needed - self.lines.len()) {
                debug!(
                    current = self.size,
                    requested = n,
                    kind = AllocErrorKind::Exhausted.name(),
                    error = %e,
                    "heap growth rejected"
                );
                bail!(AllocError {
                    kind: AllocErrorKind::Exhausted,
                    current: self.size,
                    requested: n,
                });
            }
            self.lines.resize(needed, [O::padding(); D]);
            trace!(lines = needed, capacity = needed * D, "heap storage grown");
        }

        self.clear_residue();
        Ok(new_size)
    }

    fn clear_residue(&mut self) {
        if self.residue > self.size {
            let (start, end) = (self.size, self.residue);
            self.lines.as_flattened_mut()[start..end].fill(O::padding());
        }
        self.residue = 0;
    }

    /// Grows the logical size by `n` and returns the new, padding-filled
    /// slots for the caller to populate. Call `heapify()` afterwards unless
    /// the values written keep heap order.
    ///
    /// The view borrows the heap, so it cannot outlive the next mutation.
    pub fn extend(&mut self, n: usize) -> Result<&mut [V]> {
        let start = self.size;
        self.size = self.grow(n)?;
        Ok(&mut self.lines.as_flattened_mut()[start..self.size])
    }

    /// Appends `values` in iteration order without restoring heap order.
    ///
    /// On failure the values already appended by this call are removed and
    /// the lines it allocated are released, so `size()` and `capacity()`
    /// read as before the call.
    pub fn append<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter();
        let start = self.size;
        let start_lines = self.lines.len();
        let (lower, _) = values.size_hint();
        self.grow(lower)?;

        for value in values {
            if self.size == self.capacity() {
                if let Err(report) = self.grow(1) {
                    self.rollback(start, start_lines);
                    return Err(report);
                }
            }
            self.set_slot(self.size, value);
            self.size += 1;
        }
        Ok(())
    }

    fn rollback(&mut self, len: usize, lines: usize) {
        let end = self.size;
        self.lines.as_flattened_mut()[len..end].fill(O::padding());
        self.lines.truncate(lines);
        self.size = len;
    }

    /// Places `b` at flat index `q` and moves it towards the root until its
    /// parent does not sort after it. `q` must be below `size`.
    pub fn pull_up(&mut self, b: V, mut q: usize) {
        debug_assert!(q < self.size, "pull_up position {} past size {}", q, self.size);
        while q >= Self::ARITY {
            let p = Self::parent(q);
            let a = self.slot(p);
            if !O::less(&b, &a) {
                break;
            }
            self.set_slot(q, a);
            q = p;
        }
        self.set_slot(q, b);
    }

    /// Places `a` at flat index `p` and moves it away from the root until
    /// the minimum of its children line does not sort before it. `p` must be
    /// below `size`.
    pub fn push_down(&mut self, a: V, mut p: usize) {
        debug_assert!(p < self.size, "push_down position {} past size {}", p, self.size);
        loop {
            let q = Self::children(p);
            if q >= self.size {
                break;
            }
            let x = O::minpos(&self.lines[q / D]);
            if !O::less(&x.min, &a) {
                break;
            }
            self.set_slot(p, x.min);
            p = q + x.pos;
        }
        self.set_slot(p, a);
    }

    /// Turns the first `size` values, in any order, into a heap. O(size).
    pub fn heapify(&mut self) {
        if self.size <= D {
            return;
        }
        let mut q = (self.size - 1) & !(D - 1);

        // Lines past r have no children: the displaced parent value lands
        // in a leaf, so push_down would stop immediately.
        let r = Self::parent(q);
        while q > r {
            let x = O::minpos(&self.lines[q / D]);
            let p = Self::parent(q);
            let a = self.slot(p);
            if O::less(&x.min, &a) {
                self.set_slot(p, x.min);
                self.set_slot(q + x.pos, a);
            }
            q -= D;
        }

        while q > 0 {
            let x = O::minpos(&self.lines[q / D]);
            let p = Self::parent(q);
            let a = self.slot(p);
            if O::less(&x.min, &a) {
                self.set_slot(p, x.min);
                self.push_down(a, q + x.pos);
            }
            q -= D;
        }
    }

    /// Checks heap order over every non-root line. O(size / D).
    pub fn is_heap(&self) -> bool {
        if self.size <= D {
            return true;
        }
        let mut q = (self.size - 1) & !(D - 1);
        while q > 0 {
            let x = O::minpos(&self.lines[q / D]);
            if O::less(&x.min, &self.slot(Self::parent(q))) {
                return false;
            }
            q -= D;
        }
        true
    }

    /// Adds `value`, growing storage by one line when the last is full.
    pub fn push(&mut self, value: V) -> Result<()> {
        let q = self.size;
        self.size = self.grow(1)?;
        self.pull_up(value, q);
        Ok(())
    }

    /// The minimum. The heap must not be empty.
    #[inline]
    pub fn top(&self) -> V {
        debug_assert!(self.size > 0, "top() on an empty heap");
        O::minpos(&self.lines[0]).min
    }

    /// Removes and returns the minimum. The heap must not be empty.
    pub fn pop(&mut self) -> V {
        debug_assert!(self.size > 0, "pop() on an empty heap");
        let x = O::minpos(&self.lines[0]);
        let last = self.size - 1;
        let a = self.slot(last);
        self.set_slot(last, O::padding());
        self.size = last;
        if x.pos != last {
            self.push_down(a, x.pos);
        }
        x.min
    }

    /// Pops every value and stores them back so that flat indices
    /// `[0, n)` are non-increasing, where `n` is the size before the call.
    /// Leaves `size() == 0` with the sorted values still readable by index.
    pub fn sort(&mut self) {
        let n = self.size;
        let mut line = [O::padding(); D];
        let mut x = n & !(D - 1);
        let rem = n - x;

        if rem > 0 {
            for slot in line[..rem].iter_mut().rev() {
                *slot = self.pop();
            }
            self.lines[x / D] = line;
        }
        while x > 0 {
            x -= D;
            for slot in line.iter_mut().rev() {
                *slot = self.pop();
            }
            self.lines[x / D] = line;
        }

        self.residue = self.residue.max(n);
    }

    /// True when flat indices `[0, n)` are non-increasing, the order
    /// `sort()` leaves behind. `n` must not exceed `capacity()`.
    pub fn is_sorted(&self, n: usize) -> bool {
        self.lines.as_flattened()[..n]
            .windows(2)
            .all(|w| !O::less(&w[0], &w[1]))
    }

    /// Releases all storage.
    pub fn clear(&mut self) {
        let released = self.lines.len();
        self.lines = Vec::new();
        self.size = 0;
        self.residue = 0;
        debug!(released_lines = released, "heap storage released");
    }
}

impl<V, const D: usize, O> Default for Heap<V, D, O>
where
    V: Copy,
    O: LineOrder<V>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, const D: usize, O> fmt::Debug for Heap<V, D, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("arity", &D)
            .field("size", &self.size)
            .field("capacity", &(self.lines.len() * D))
            .finish()
    }
}

impl<V, const D: usize, O> Index<usize> for Heap<V, D, O> {
    type Output = V;

    #[inline]
    fn index(&self, index: usize) -> &V {
        &self.lines.as_flattened()[index]
    }
}

impl<V, const D: usize, O> IndexMut<usize> for Heap<V, D, O> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut V {
        &mut self.lines.as_flattened_mut()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Descending;

    impl<V: Copy, const D: usize, O: LineOrder<V>> Heap<V, D, O> {
        /// heapify without the leaf-level shortcut.
        fn heapify_general(&mut self) {
            if self.size <= D {
                return;
            }
            let mut q = (self.size - 1) & !(D - 1);
            while q > 0 {
                let x = O::minpos(&self.lines[q / D]);
                let p = Self::parent(q);
                let a = self.slot(p);
                if O::less(&x.min, &a) {
                    self.set_slot(p, x.min);
                    self.push_down(a, q + x.pos);
                }
                q -= D;
            }
        }
    }

    fn scrambled(n: usize) -> Vec<u16> {
        (0..n).map(|i| ((i * 7919 + 13) % 1009) as u16).collect()
    }

    #[test]
    fn test_leaf_pass_matches_general_pass() {
        for n in [0, 1, 8, 9, 17, 64, 65, 100, 513, 1000] {
            let values = scrambled(n);
            let mut fast: Heap<u16> = Heap::new();
            let mut general: Heap<u16> = Heap::new();
            fast.append(values.iter().copied()).unwrap();
            general.append(values.iter().copied()).unwrap();

            fast.heapify();
            general.heapify_general();

            assert_eq!(fast.as_slice(), general.as_slice(), "n = {}", n);
            assert!(fast.is_heap());
        }
    }

    #[test]
    fn test_parent_children_are_inverse() {
        type H = Heap<u32, 4>;
        for p in 0..200 {
            let q = H::children(p);
            for slot in q..q + 4 {
                assert_eq!(H::parent(slot), p);
            }
        }
    }

    #[test]
    fn test_extend_view_is_padding() {
        let mut heap: Heap<u16> = Heap::new();
        let view = heap.extend(5).unwrap();
        assert_eq!(view, &[u16::MAX; 5]);
        view.copy_from_slice(&[5, 4, 3, 2, 1]);
        assert_eq!(heap.size(), 5);
        assert_eq!(heap.capacity(), 8);
        assert_eq!(heap.get(5), u16::MAX);
    }

    #[test]
    fn test_pop_restores_padding() {
        let mut heap: Heap<u16> = Heap::new();
        heap.append([3, 1, 2]).unwrap();
        heap.heapify();
        assert_eq!(heap.pop(), 1);
        assert_eq!(heap.size(), 2);
        assert_eq!(heap.get(2), u16::MAX);
    }

    #[test]
    fn test_sort_exact_multiple_of_arity() {
        let mut heap: Heap<u16> = Heap::new();
        heap.append((0..16).rev()).unwrap();
        heap.heapify();
        heap.sort();
        assert_eq!(heap.size(), 0);
        assert_eq!(heap.capacity(), 16);
        assert!(heap.is_sorted(16));
        assert_eq!(heap.get(0), 15);
        assert_eq!(heap.get(15), 0);
    }

    #[test]
    fn test_residue_is_repadded_on_growth() {
        let mut heap: Heap<u16> = Heap::new();
        heap.append([4, 9, 1, 7, 3]).unwrap();
        heap.heapify();
        heap.sort();
        assert_eq!(heap.get(0), 9);

        heap.push(5).unwrap();
        assert_eq!(heap.size(), 1);
        assert_eq!(heap.top(), 5);
        for i in 1..heap.capacity() {
            assert_eq!(heap.get(i), u16::MAX);
        }
        assert_eq!(heap.pop(), 5);
    }

    #[test]
    fn test_extend_overflow_leaves_heap_unchanged() {
        let mut heap: Heap<u16> = Heap::new();
        heap.push(1).unwrap();
        let report = heap.extend(usize::MAX).unwrap_err();
        let err = report.downcast_ref::<AllocError>().unwrap();
        assert_eq!(err.kind, AllocErrorKind::Overflow);
        assert_eq!(err.current, 1);
        assert_eq!(heap.size(), 1);
        assert_eq!(heap.capacity(), 8);
    }

    #[test]
    fn test_extend_exhausted_leaves_heap_unchanged() {
        let mut heap: Heap<u64> = Heap::new();
        let report = heap.extend(usize::MAX / 2).unwrap_err();
        let err = report.downcast_ref::<AllocError>().unwrap();
        assert_eq!(err.kind, AllocErrorKind::Exhausted);
        assert_eq!(heap.size(), 0);
        assert_eq!(heap.capacity(), 0);
    }

    /// Zero-sized values let a heap sit at the top of the size domain
    /// without allocating.
    struct Unit;

    impl LineOrder<()> for Unit {
        fn padding() {}

        fn less(_: &(), _: &()) -> bool {
            false
        }
    }

    fn heap_near_size_max(free_lines: usize) -> Heap<(), 8, Unit> {
        let mut heap: Heap<(), 8, Unit> = Heap::new();
        let lines = Heap::<(), 8, Unit>::SIZE_MAX / 8 - free_lines;
        // SAFETY: `[(); 8]` is zero sized, so a Vec of it has capacity
        // usize::MAX and its elements need no initialization.
        unsafe { heap.lines.set_len(lines) };
        heap.size = lines * 8;
        heap
    }

    #[test]
    fn test_append_overflow_mid_stream_releases_new_lines() {
        let mut heap = heap_near_size_max(1);
        let (size, capacity) = (heap.size(), heap.capacity());

        // No size hint, so the first line is allocated inside the loop and
        // the ninth value overflows the size domain.
        let report = heap
            .append(std::iter::repeat(()).take(9).filter(|_| true))
            .unwrap_err();
        let err = report.downcast_ref::<AllocError>().unwrap();
        assert_eq!(err.kind, AllocErrorKind::Overflow);
        assert_eq!(err.current, Heap::<(), 8, Unit>::SIZE_MAX);
        assert_eq!(heap.size(), size);
        assert_eq!(heap.capacity(), capacity);
    }

    #[test]
    fn test_append_overflow_from_size_hint_changes_nothing() {
        let mut heap = heap_near_size_max(1);
        let (size, capacity) = (heap.size(), heap.capacity());

        let report = heap.append(std::iter::repeat(()).take(9)).unwrap_err();
        let err = report.downcast_ref::<AllocError>().unwrap();
        assert_eq!(err.kind, AllocErrorKind::Overflow);
        assert_eq!(err.requested, 9);
        assert_eq!(heap.size(), size);
        assert_eq!(heap.capacity(), capacity);
    }

    #[test]
    fn test_append_fits_exactly_at_size_max() {
        let mut heap = heap_near_size_max(1);
        heap.append(std::iter::repeat(()).take(8).filter(|_| true))
            .unwrap();
        assert_eq!(heap.size(), Heap::<(), 8, Unit>::SIZE_MAX);
        assert_eq!(heap.capacity(), Heap::<(), 8, Unit>::SIZE_MAX);
    }

    fn heapified(n: u16) -> Heap<u16> {
        let mut heap: Heap<u16> = Heap::new();
        heap.append((0..n).map(|i| 10 + (i * 37) % 101)).unwrap();
        heap.heapify();
        assert!(heap.is_heap());
        heap
    }

    #[test]
    fn test_is_heap_detects_violation_in_partial_last_line() {
        // 20 values: lines at 0, 8 and 16; the last holds slots 16..20.
        let mut heap = heapified(20);
        let q = 16;
        let below_parent = heap.get(Heap::<u16>::parent(q)) - 1;
        heap.set(q + 2, below_parent);
        assert!(!heap.is_heap());
    }

    #[test]
    fn test_is_heap_detects_violation_in_interior_line() {
        // 90 values: line 8 is interior, its slots own children lines.
        let mut heap = heapified(90);
        let q = 8;
        assert!(Heap::<u16>::children(q) < heap.size());
        let below_parent = heap.get(Heap::<u16>::parent(q)) - 1;
        heap.set(q + 5, below_parent);
        assert!(!heap.is_heap());
    }

    #[test]
    fn test_is_heap_accepts_lowered_root_values() {
        let mut heap = heapified(20);
        for i in 0..8 {
            heap.set(i, heap.get(i) - 1);
        }
        assert!(heap.is_heap());
    }

    #[test]
    fn test_descending_heap_pops_largest_first() {
        let mut heap: Heap<u32, 4, Descending> = Heap::new();
        heap.append([5, 17, 3, 99, 42, 8, 1, 64, 23]).unwrap();
        heap.heapify();
        assert!(heap.is_heap());
        let popped: Vec<u32> = (0..9).map(|_| heap.pop()).collect();
        assert_eq!(popped, vec![99, 64, 42, 23, 17, 8, 5, 3, 1]);
    }

    #[test]
    fn test_debug_reports_geometry() {
        let mut heap: Heap<u16> = Heap::new();
        heap.push(3).unwrap();
        assert_eq!(format!("{:?}", heap), "Heap { arity: 8, size: 1, capacity: 8 }");
    }
}
