//! # Entries
//!
//! An `Entry` pairs a key with an opaque payload. Heap orders over entries
//! (see [`crate::line::ByKey`]) look at `key` only; `payload` travels with its
//! key through every internal move and is never read by comparison code.

/// A key with an attached payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Entry<K, P> {
    pub key: K,
    pub payload: P,
}

impl<K, P> Entry<K, P> {
    pub const fn new(key: K, payload: P) -> Self {
        Self { key, payload }
    }

    pub fn into_parts(self) -> (K, P) {
        (self.key, self.payload)
    }
}

impl<K, P> From<(K, P)> for Entry<K, P> {
    fn from((key, payload): (K, P)) -> Self {
        Self { key, payload }
    }
}

impl<K, P> From<Entry<K, P>> for (K, P) {
    fn from(entry: Entry<K, P>) -> Self {
        entry.into_parts()
    }
}
