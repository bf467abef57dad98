//! Process-independent hashing for identity keys and constant values.
//!
//! `std`'s `RandomState` reseeds per process, which would make
//! [`ExprComparer::hash_of`](crate::ExprComparer::hash_of) differ between runs. Identity hashes
//! are instead fed through a seeded xxh3 digest and folded down to the 32-bit width of the
//! structural accumulator.

use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5f3c_9a2e_71d4_b806;

/// `std::hash::Hasher` backed by a fixed-seed xxh3 state.
pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn finish32(&self) -> u32 {
        fold_to_u32(self.inner.digest())
    }
}

impl Hasher for StableHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    fn finish(&self) -> u64 {
        self.inner.digest()
    }
}

fn fold_to_u32(v: u64) -> u32 {
    ((v >> 32) as u32) ^ (v as u32)
}

/// 32-bit identity hash that is stable across processes on the same platform.
///
/// Implemented for every [`Hash`] type; this is the "identity hash" folded into the structural
/// accumulator for types, members, methods, constructors, parameter names and constant values.
pub trait StableHash {
    /// Hash `self` with the crate's seeded xxh3 hasher, folded to 32 bits.
    fn stable_hash(&self) -> u32;
}

impl<T: Hash + ?Sized> StableHash for T {
    fn stable_hash(&self) -> u32 {
        let mut h = StableHasher::new();
        self.hash(&mut h);
        h.finish32()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/stable_hash.rs"]
mod tests;
