//! # Scalar Minpos Reference
//!
//! Left-to-right reduction over a line. A later slot replaces the running
//! minimum only when strictly smaller, which yields the lowest-index
//! tie-break. Every accelerated kernel is checked against this module.

use super::{Line, MinPos};

/// Scalar minpos under the natural order of `V`.
#[inline]
pub fn minpos<V: Copy + Ord, const D: usize>(line: &Line<V, D>) -> MinPos<V> {
    minpos_by(line, |a, b| a < b)
}

/// Scalar minpos under an arbitrary strict order.
#[inline]
pub fn minpos_by<V, F, const D: usize>(line: &Line<V, D>, less: F) -> MinPos<V>
where
    V: Copy,
    F: Fn(&V, &V) -> bool,
{
    let mut best = MinPos {
        min: line[0],
        pos: 0,
    };
    for (pos, value) in line.iter().enumerate().skip(1) {
        if less(value, &best.min) {
            best = MinPos { min: *value, pos };
        }
    }
    best
}
