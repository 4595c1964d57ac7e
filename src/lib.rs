//! # lineheap - D-ary Heaps over Cache-Line Sized Lines
//!
//! lineheap is a priority queue engine whose tree nodes each own one line of
//! D keys, sized to fill a vector register or cache line. Finding the
//! smallest child of a node is one "minpos" scan over a line (a single
//! `PHMINPOSUW` for 8 x u16 on SSE4.1) instead of D - 1 scalar comparisons.
//! This implementation prioritizes:
//!
//! - **Whole-line storage**: values live in `[V; D]` blocks; every sift step
//!   touches one line
//! - **Pluggable minpos**: a scalar reference reduction and build-selected
//!   vector kernels with bit-identical results
//! - **Classic bounds**: O(log_D n) push/pop, O(n) heapify, in-place sort
//!
//! ## Quick Start
//!
//! ```
//! use lineheap::H8;
//!
//! let mut heap = H8::new();
//! heap.append([40, 7, 19, 3, 88, 12, 5, 61, 2, 33])?;
//! heap.heapify();
//! assert!(heap.is_heap());
//!
//! heap.push(1)?;
//! assert_eq!(heap.pop(), 1);
//! assert_eq!(heap.pop(), 2);
//! assert_eq!(heap.top(), 3);
//! # Ok::<(), eyre::Report>(())
//! ```
//!
//! ## Architecture
//!
//! lineheap uses a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   HeapMap<K, P, D, O>  (entries)    │
//! ├─────────────────────────────────────┤
//! │   Heap<V, D, O>        (engine)     │
//! ├─────────────────────────────────────┤
//! │   LineOrder: Ascending | Descending │
//! │              | ByKey<O>             │
//! ├─────────────────────────────────────┤
//! │   minpos: scalar | SSE4.1 | NEON    │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Sentinel Keys
//!
//! Incomplete lines are padded with the key domain's maximum
//! (`Key::SENTINEL`), which never wins a minpos scan. That value is reserved:
//! inserting it is a contract violation. Descending heaps reserve the
//! minimum (`Key::FLOOR`) instead.
//!
//! ## Errors
//!
//! Only storage growth can fail. Fallible methods return `eyre::Result`,
//! and the failure is an [`AllocError`] recoverable with
//! `report.downcast_ref::<AllocError>()`. Empty-heap pops and out-of-range
//! positions are debug-asserted contract violations.
//!
//! ## Module Overview
//!
//! - [`config`]: Arity and kernel lane constants
//! - [`types`]: `Key`, `U48`, `Entry`
//! - [`line`]: Lines, `MinPos`, orders, scalar and SIMD kernels
//! - [`heap`]: The `Heap` engine and `AllocError`
//! - [`map`]: The `HeapMap` entry adapter

#[macro_use]
mod macros;

pub mod config;
pub mod heap;
pub mod line;
pub mod map;
pub mod types;

pub use heap::{AllocError, AllocErrorKind, Heap};
pub use line::{Ascending, ByKey, Descending, Line, LineOrder, MinPos};
pub use map::HeapMap;
pub use types::{Entry, Key, U48};

/// The canonical configuration: 8 x u16 keys per line, one SSE register.
pub type H8 = Heap<u16, 8>;

pub type Heap8<K> = Heap<K, 8>;
pub type Heap16<K> = Heap<K, 16>;
pub type Heap32<K> = Heap<K, 32>;

pub type HeapMap8<K, P> = HeapMap<K, P, 8>;
