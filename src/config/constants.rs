//! # Line Heap Configuration Constants
//!
//! This module centralizes the numeric configuration of the heap engine. The
//! arity of a heap is a const generic, but the defaults and the kernel lane
//! widths are defined here so that their relationships can be checked once.
//!
//! ## Dependency Graph
//!
//! ```text
//! CACHE_LINE_SIZE (64 bytes)
//!       │
//!       └─> DEFAULT_ARITY (8)
//!             A default u16 line (8 x 2 bytes) must fit in one cache line,
//!             so a single minpos call never touches two lines.
//!
//! SSE_U16_LANES (8)
//!       │
//!       └─> MAX_SIMD_LINE (32)
//!             Wide kernels fold whole vectors, so the widest accelerated
//!             line must be a multiple of the lane count.
//! ```
//!
//! ## Critical Invariants
//!
//! These invariants are enforced by compile-time assertions:
//!
//! 1. `DEFAULT_ARITY` is a power of two greater than 1
//! 2. `DEFAULT_ARITY * size_of::<u16>() <= CACHE_LINE_SIZE`
//! 3. `MAX_SIMD_LINE % SSE_U16_LANES == 0`
//!
//! Arities other than the default are validated per instantiation by
//! `Heap::ARITY`; a bad arity fails the build where the heap is first used.

// ============================================================================
// LINE GEOMETRY
// ============================================================================

/// Size of a CPU cache line in bytes.
pub const CACHE_LINE_SIZE: usize = 64;

/// Default number of keys per line, and therefore the default fan-out.
pub const DEFAULT_ARITY: usize = 8;

const _: () = assert!(
    DEFAULT_ARITY > 1 && DEFAULT_ARITY.is_power_of_two(),
    "DEFAULT_ARITY must be a power of two greater than 1"
);

const _: () = assert!(
    DEFAULT_ARITY * core::mem::size_of::<u16>() <= CACHE_LINE_SIZE,
    "a default u16 line must fit in one cache line"
);

// ============================================================================
// KERNEL LANE WIDTHS
// ============================================================================

/// Number of u16 lanes in one 128-bit vector (SSE4.1 / NEON).
pub const SSE_U16_LANES: usize = 8;

/// Widest u16 line with an accelerated minpos kernel.
pub const MAX_SIMD_LINE: usize = 32;

const _: () = assert!(
    MAX_SIMD_LINE % SSE_U16_LANES == 0,
    "MAX_SIMD_LINE must be a whole number of vectors"
);
