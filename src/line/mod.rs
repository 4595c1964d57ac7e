//! # Lines and the Minpos Primitive
//!
//! A line is the heap's unit of storage: exactly `D` values laid out
//! contiguously so one line maps onto one vector register or cache line.
//! Every internal node of the heap tree owns one whole line of children, so
//! "which child is smallest" is a single minpos call over a line.
//!
//! ## Minpos Contract
//!
//! Given the `D` values of a line, minpos returns the minimum and the index
//! of its first occurrence (ties go to the lowest index). It never reads
//! outside the line. Accelerated kernels must agree with the scalar
//! reference in [`scalar`] on every input.
//!
//! ## Orders
//!
//! The engine never compares values directly. It goes through a
//! [`LineOrder`], which supplies the padding value, the strict comparison,
//! and the minpos scan:
//!
//! | Order | Values | Padding | Minpos |
//! |-------|--------|---------|--------|
//! | `Ascending` | `K: Key` | `Key::SENTINEL` | `Key::minpos` (SIMD for u16) |
//! | `Descending` | `K: Key` | `Key::FLOOR` | scalar |
//! | `ByKey<O>` | `Entry<K, P>` | `O`'s padding key | `O`'s minpos over the gathered keys |
//!
//! ## Kernel Selection
//!
//! Kernels are chosen at build time (`target_feature`), never through
//! runtime dispatch:
//!
//! | Architecture | Feature | Lines |
//! |--------------|---------|-------|
//! | x86_64 | SSE4.1 | u16 x 8 / 16 / 32 |
//! | aarch64 | NEON | u16 x multiples of 8 |
//! | any | scalar | everything else |

use std::marker::PhantomData;

use crate::types::{Entry, Key};

pub mod scalar;
pub mod simd;

/// A block of `D` values: one node's children, one minpos scan.
pub type Line<V, const D: usize> = [V; D];

/// Result of a minpos scan: the minimum value and its index in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinPos<V> {
    pub min: V,
    pub pos: usize,
}

/// Ordering contract between the heap engine and the values it stores.
pub trait LineOrder<V: Copy> {
    /// Value that fills slots past the logical end. Must lose (or tie
    /// harmlessly) against every value a caller inserts.
    fn padding() -> V;

    /// Strict "a sorts before b".
    fn less(a: &V, b: &V) -> bool;

    /// Minimum of `line` under [`LineOrder::less`], lowest index on ties.
    #[inline]
    fn minpos<const D: usize>(line: &Line<V, D>) -> MinPos<V> {
        scalar::minpos_by(line, Self::less)
    }
}

/// Smallest key first. Uses the key type's accelerated minpos.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ascending;

impl<K: Key> LineOrder<K> for Ascending {
    #[inline]
    fn padding() -> K {
        K::SENTINEL
    }

    #[inline]
    fn less(a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn minpos<const D: usize>(line: &Line<K, D>) -> MinPos<K> {
        K::minpos(line)
    }
}

/// Largest key first. `Key::FLOOR` is reserved as padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Descending;

impl<K: Key> LineOrder<K> for Descending {
    #[inline]
    fn padding() -> K {
        K::FLOOR
    }

    #[inline]
    fn less(a: &K, b: &K) -> bool {
        a > b
    }
}

/// Lifts a key order to entries. Only `Entry::key` is compared.
pub struct ByKey<O>(PhantomData<fn() -> O>);

impl<K, P, O> LineOrder<Entry<K, P>> for ByKey<O>
where
    K: Key,
    P: Copy + Default,
    O: LineOrder<K>,
{
    #[inline]
    fn padding() -> Entry<K, P> {
        Entry::new(O::padding(), P::default())
    }

    #[inline]
    fn less(a: &Entry<K, P>, b: &Entry<K, P>) -> bool {
        O::less(&a.key, &b.key)
    }

    /// Gathers the keys into their own line so the key order's kernel does
    /// the scan. Payloads are only copied out with the winning entry.
    #[inline]
    fn minpos<const D: usize>(line: &Line<Entry<K, P>, D>) -> MinPos<Entry<K, P>> {
        let keys: Line<K, D> = std::array::from_fn(|i| line[i].key);
        let x = O::minpos(&keys);
        MinPos {
            min: line[x.pos],
            pos: x.pos,
        }
    }
}
