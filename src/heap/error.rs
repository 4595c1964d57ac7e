//! # Heap Growth Errors
//!
//! Storage growth is the only recoverable failure in the engine. It is raised
//! through `eyre::bail!` so it composes with `?`, and callers that need to
//! tell it apart recover it with `report.downcast_ref::<AllocError>()`.
//!
//! Everything else (empty-heap pops, positions past the logical size) is a
//! caller contract violation, checked with `debug_assert!`, not an error.

use std::fmt;

/// Why a growth request could not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocErrorKind {
    /// `current + requested` exceeds the largest representable size.
    Overflow,
    /// The allocator refused to reserve the lines.
    Exhausted,
}

impl AllocErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            AllocErrorKind::Overflow => "overflow",
            AllocErrorKind::Exhausted => "exhausted",
        }
    }
}

/// A growth request failed; the heap is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    pub kind: AllocErrorKind,
    /// Logical size before the request.
    pub current: usize,
    /// Number of elements requested.
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "heap allocation failed ({}): cannot grow {} elements by {}",
            self.kind.name(),
            self.current,
            self.requested
        )
    }
}

impl std::error::Error for AllocError {}
