//! # Heap Configuration Module
//!
//! This module centralizes the configuration constants for the line heap.
//! Constants that depend on each other live together and their relationships
//! are enforced through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: Arity, cache line and SIMD lane widths

pub mod constants;
pub use constants::*;
