//! # Heap Keys
//!
//! A key is a fixed-width unsigned integer with two reserved values: the
//! maximum (`SENTINEL`), which pads the tail of the last line in ascending
//! heaps, and the minimum (`FLOOR`), which does the same in descending heaps.
//!
//! `Key::minpos` is the hook through which a key type plugs in an accelerated
//! line scan. The default is the scalar left-to-right reduction; `u16`
//! overrides it with the vector kernels in [`crate::line::simd`].

use std::fmt;
use std::hash::Hash;

use crate::line::{scalar, simd, Line, MinPos};

/// Totally ordered fixed-width key.
pub trait Key: Copy + Ord + Hash + fmt::Debug + 'static {
    /// Maximum value of the domain. Pads lines; never inserted.
    const SENTINEL: Self;

    /// Minimum value of the domain. Pads lines of descending heaps.
    const FLOOR: Self;

    /// Minimum of `line` and the lowest index holding it.
    ///
    /// Overrides must return exactly what the scalar reduction returns for
    /// every possible line.
    #[inline]
    fn minpos<const D: usize>(line: &Line<Self, D>) -> MinPos<Self> {
        scalar::minpos(line)
    }
}

crate::impl_key!(u8, u32, u64);

impl Key for u16 {
    const SENTINEL: Self = u16::MAX;
    const FLOOR: Self = u16::MIN;

    #[inline]
    fn minpos<const D: usize>(line: &Line<Self, D>) -> MinPos<Self> {
        simd::minpos_u16(line)
    }
}

/// Unsigned 48-bit key.
///
/// Stored in a `u64`; values above `U48::MAX` are unrepresentable. `U48::MAX`
/// is the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct U48(u64);

impl U48 {
    /// Largest representable value, `2^48 - 1`.
    pub const MAX: U48 = U48((1 << 48) - 1);

    /// Smallest representable value.
    pub const MIN: U48 = U48(0);

    /// Returns `None` when `value` does not fit in 48 bits.
    pub const fn new(value: u64) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(U48(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Key for U48 {
    const SENTINEL: Self = U48::MAX;
    const FLOOR: Self = U48::MIN;
}

impl From<u8> for U48 {
    fn from(value: u8) -> Self {
        U48(value as u64)
    }
}

impl From<u16> for U48 {
    fn from(value: u16) -> Self {
        U48(value as u64)
    }
}

impl From<u32> for U48 {
    fn from(value: u32) -> Self {
        U48(value as u64)
    }
}

impl From<U48> for u64 {
    fn from(value: U48) -> Self {
        value.0
    }
}

impl fmt::Display for U48 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
