//! # Internal Macros
//!
//! This module provides internal macros for reducing boilerplate in lineheap.
//!
//! ## impl_key!
//!
//! Generates [`Key`](crate::types::Key) implementations for primitive
//! unsigned integers. The type's `MAX` becomes the padding sentinel and its
//! `MIN` the floor used by descending orders.
//!
//! ### Usage
//!
//! ```ignore
//! impl_key!(u8, u32, u64);
//!
//! // Generates, for each type:
//! // impl Key for u32 {
//! //     const SENTINEL: Self = u32::MAX;
//! //     const FLOOR: Self = u32::MIN;
//! // }
//! ```
//!
//! Types with an accelerated minpos kernel (u16) implement `Key` by hand so
//! they can override `Key::minpos`.

/// Generates `Key` impls that use the scalar minpos reduction.
#[macro_export]
macro_rules! impl_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::types::Key for $ty {
                const SENTINEL: Self = <$ty>::MAX;
                const FLOOR: Self = <$ty>::MIN;
            }
        )*
    };
}
