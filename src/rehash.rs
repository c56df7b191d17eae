//! Redistributing the bits of existing hash values.
//!
//! Many hash functions, `Hash` impls for integers among them, produce values
//! whose low bits are poorly distributed, which is bad news for power-of-two
//! sized tables.  Running such a value through SpookyHash fixes that.  Hash
//! functions that are already well distributed can say so with
//! [`WellDistributed`], so callers can skip the extra work.

use std::hash::{BuildHasher, Hasher};

use crate::oneshot::{hash32, hash64};

/// Marks a [`BuildHasher`] whose hashers produce well distributed output,
/// with no need for a further pass through [`rehash64`].
pub trait WellDistributed: BuildHasher {}

/// Redistributes a 64-bit hash value: the SpookyHash of its little-endian
/// bytes.
pub fn rehash64(value: u64, seed: u64) -> u64 {
    hash64(&value.to_le_bytes(), seed)
}

/// Redistributes a 32-bit hash value: the SpookyHash of its little-endian
/// bytes.
pub fn rehash32(value: u32, seed: u32) -> u32 {
    hash32(&value.to_le_bytes(), seed)
}

/// `rehash64` with a zero seed.
pub fn rehash64_unseeded(value: u64) -> u64 {
    rehash64(value, 0)
}

/// `rehash32` with a zero seed.
pub fn rehash32_unseeded(value: u32) -> u32 {
    rehash32(value, 0)
}

/// Wraps a [`BuildHasher`] so that every hasher it builds has its output
/// redistributed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Redistribute<B> {
    inner: B,
    seed: u64,
}

impl<B: BuildHasher> Redistribute<B> {
    pub fn new(inner: B) -> Self {
        Self::with_seed(inner, 0)
    }

    pub fn with_seed(inner: B, seed: u64) -> Self {
        Self { inner, seed }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: BuildHasher> BuildHasher for Redistribute<B> {
    type Hasher = RedistributingHasher<B::Hasher>;

    fn build_hasher(&self) -> Self::Hasher {
        RedistributingHasher {
            inner: self.inner.build_hasher(),
            seed: self.seed,
        }
    }
}

impl<B: BuildHasher> WellDistributed for Redistribute<B> {}

/// The hasher built by [`Redistribute`].
#[derive(Clone, Debug)]
pub struct RedistributingHasher<H> {
    inner: H,
    seed: u64,
}

impl<H: Hasher> Hasher for RedistributingHasher<H> {
    fn write(&mut self, bytes: &[u8]) {
        self.inner.write(bytes);
    }

    fn finish(&self) -> u64 {
        rehash64(self.inner.finish(), self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::SpookyBuildHasher;
    use std::{collections::hash_map::RandomState, hash::BuildHasherDefault};

    // A hasher whose output is just the last integer written.
    #[derive(Default)]
    struct Identity(u64);

    impl Hasher for Identity {
        fn write(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.0 = (self.0 << 8) | b as u64;
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }

        fn finish(&self) -> u64 {
            self.0
        }
    }

    fn require_well_distributed<B: WellDistributed>(_: &B) {}

    #[test]
    fn rehash_is_the_hash_of_the_bytes() {
        assert_eq!(rehash32(5, 7), 0xaca99e90);
        assert_eq!(rehash64(5, 7), hash64(&5u64.to_le_bytes(), 7));
    }

    #[test]
    fn unseeded_rehash_uses_seed_zero() {
        for value in [0u64, 1, 5, 0xdeadbeef, u64::MAX] {
            assert_eq!(rehash64_unseeded(value), rehash64(value, 0));
            assert_eq!(rehash32_unseeded(value as u32), rehash32(value as u32, 0));
        }
        assert_ne!(rehash64_unseeded(5), rehash64(5, 7));
    }

    #[test]
    fn redistribute_spreads_low_bits() {
        let build = Redistribute::new(BuildHasherDefault::<Identity>::default());

        // Sequential keys all share their high bits; after redistribution the
        // high bits of the results shouldn't all agree.
        let high_bits: Vec<u64> = (0..64u64)
            .map(|n| {
                let mut hasher = build.build_hasher();
                hasher.write_u64(n);
                hasher.finish() >> 56
            })
            .collect();
        assert!(high_bits.iter().any(|&b| b != high_bits[0]));
    }

    #[test]
    fn capability_marker() {
        require_well_distributed(&SpookyBuildHasher::default());
        require_well_distributed(&Redistribute::new(RandomState::new()));
    }
}
