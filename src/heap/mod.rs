//! # D-ary Line Heap
//!
//! This module implements the heap engine: a priority queue whose internal
//! nodes each own one full line of D children, so sifting a value down one
//! level costs a single minpos call instead of D - 1 comparisons.
//!
//! ## Architecture Overview
//!
//! ```text
//! Heap<V, D, O>
//! +-----------------------------+
//! | lines: Vec<[V; D]>          |  whole-line storage, grows geometrically
//! | size:  usize                |  logical element count
//! +-----------------------------+
//!          │ minpos / less / padding
//!          ▼
//!     O: LineOrder<V>           Ascending | Descending | ByKey<O>
//!          │
//!          ▼
//!     Key::minpos               scalar reduction or SIMD kernel
//! ```
//!
//! ## Operations
//!
//! - `extend` / `append`: bulk load without ordering, then `heapify`
//! - `push` / `pop` / `top`: priority queue interface
//! - `pull_up` / `push_down`: single-value repair at a flat index
//! - `sort`: in-place heap sort into non-increasing storage order
//! - `is_heap` / `is_sorted`: invariant checks
//! - `clear`: releases all storage
//!
//! ## Thread Safety
//!
//! A heap is a plain owned value with no interior mutability. Sharing one
//! across threads requires external synchronization.

mod engine;
mod error;

pub use engine::Heap;
pub use error::{AllocError, AllocErrorKind};
