//! # Key and Entry Types
//!
//! This module defines the values a heap stores.
//!
//! ## Module Structure
//!
//! - `key`: The `Key` trait and the 48-bit `U48` key
//! - `entry`: `Entry<K, P>`, a key carrying an opaque payload
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `Key` | Totally ordered unsigned key with a reserved sentinel |
//! | `U48` | 48-bit key for scheduler style workloads |
//! | `Entry<K, P>` | (key, payload) pair ordered by key alone |
//!
//! ## Sentinel Contract
//!
//! `Key::SENTINEL` is the maximum of the key domain and pads incomplete
//! lines. It always loses a minpos comparison against a real key, so it must
//! never be inserted. Descending orders pad with `Key::FLOOR` instead.

mod entry;
mod key;

pub use entry::Entry;
pub use key::{Key, U48};
