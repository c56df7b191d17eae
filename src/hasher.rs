//! Incremental SpookyHash V2.

use std::hash::{BuildHasher, Hasher};

use crate::{
    error::Result,
    hash_code::HashCode128,
    mixers::{long, read_block, short, BLOCK_SIZE, BUF_SIZE, NUM_VARS},
    oneshot::checked_range,
    rehash::WellDistributed,
};

/// An incremental SpookyHash V2 hasher.
///
/// However a message is split across calls to [`update`](Self::update), the
/// digest is the same as [`hash128`](crate::hash128) of the whole message
/// with the same seeds.
///
/// Finalizing doesn't consume or modify the hasher, so it can be finalized
/// any number of times, and updated again afterwards.
///
/// A hasher is plain mutable state with no internal synchronization.
#[derive(Clone)]
pub struct SpookyHasher {
    // Until a full `BUF_SIZE` bytes have been seen, only the first two words
    // are used, and they hold the seeds.
    state: [u64; NUM_VARS],

    // Unabsorbed bytes.  Always fewer than `BUF_SIZE` between calls.
    buffer: [u8; BUF_SIZE],

    // Number of bytes in `buffer`.
    remainder: usize,

    // Total bytes seen.
    length: u64,
}

impl SpookyHasher {
    pub fn new(seed1: u64, seed2: u64) -> Self {
        Self {
            state: seeded_state(seed1, seed2),
            buffer: [0; BUF_SIZE],
            remainder: 0,
            length: 0,
        }
    }

    pub fn with_signed_seeds(seed1: i64, seed2: i64) -> Self {
        Self::new(seed1 as u64, seed2 as u64)
    }

    /// Forgets everything hashed so far, and starts over with new seeds.
    pub fn init(&mut self, seed1: u64, seed2: u64) {
        self.state = seeded_state(seed1, seed2);
        self.remainder = 0;
        self.length = 0;
    }

    /// Total number of bytes hashed so far.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Adds `message` to the data being hashed.
    pub fn update(&mut self, message: &[u8]) {
        let new_remainder = self.remainder + message.len();

        // Not enough for the long path yet: just buffer it.
        if new_remainder < BUF_SIZE {
            self.buffer[self.remainder..new_remainder].copy_from_slice(message);
            self.remainder = new_remainder;
            self.length += message.len() as u64;
            return;
        }

        let mut h = if self.length < BUF_SIZE as u64 {
            long::initial_state(self.state[0], self.state[1])
        } else {
            self.state
        };
        self.length += message.len() as u64;

        // Top up the buffer to two full blocks and absorb them.
        let mut rest = message;
        if self.remainder > 0 {
            let (prefix, tail) = message.split_at(BUF_SIZE - self.remainder);
            self.buffer[self.remainder..].copy_from_slice(prefix);
            long::mix_block(&mut h, &read_block(&self.buffer[..BLOCK_SIZE]));
            long::mix_block(&mut h, &read_block(&self.buffer[BLOCK_SIZE..]));
            rest = tail;
        }

        // Whole blocks come straight from the caller's slice.
        let mut blocks = rest.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            long::mix_block(&mut h, &read_block(block));
        }

        let leftover = blocks.remainder();
        self.buffer[..leftover.len()].copy_from_slice(leftover);
        self.remainder = leftover.len();
        self.state = h;
    }

    /// Adds `len` bytes of `message` starting at `start`.
    pub fn update_range(&mut self, message: &[u8], start: usize, len: usize) -> Result<()> {
        let range = checked_range(message.len(), start, len)?;
        self.update(&message[range]);
        Ok(())
    }

    /// Adds a sequence of UTF-16 code units, each as two little-endian bytes.
    pub fn update_utf16<I>(&mut self, units: I)
    where
        I: IntoIterator<Item = u16>,
    {
        let mut chunk = [0u8; BLOCK_SIZE];
        let mut filled = 0;
        for unit in units {
            chunk[filled..(filled + 2)].copy_from_slice(&unit.to_le_bytes());
            filled += 2;
            if filled == chunk.len() {
                self.update(&chunk);
                filled = 0;
            }
        }
        self.update(&chunk[..filled]);
    }

    /// Adds the UTF-16 encoding of `s`.
    pub fn update_str(&mut self, s: &str) {
        self.update_utf16(s.encode_utf16());
    }

    /// The 128-bit digest of everything hashed so far.
    pub fn final128(&self) -> (u64, u64) {
        if self.length < BUF_SIZE as u64 {
            return short::hash_short(
                &self.buffer[..self.remainder],
                self.state[0],
                self.state[1],
            );
        }

        // Work on a copy, so the hasher can keep going.
        let mut h = self.state;
        let mut tail = &self.buffer[..self.remainder];
        if tail.len() >= BLOCK_SIZE {
            long::mix_block(&mut h, &read_block(tail));
            tail = &tail[BLOCK_SIZE..];
        }
        long::finish(&mut h, tail);

        (h[0], h[1])
    }

    pub fn final_hash_code(&self) -> HashCode128 {
        self.final128().into()
    }

    pub fn final64(&self) -> u64 {
        self.final128().0
    }

    pub fn final32(&self) -> u32 {
        self.final128().0 as u32
    }
}

fn seeded_state(seed1: u64, seed2: u64) -> [u64; NUM_VARS] {
    let mut state = [0; NUM_VARS];
    state[0] = seed1;
    state[1] = seed2;
    state
}

impl Default for SpookyHasher {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl std::fmt::Debug for SpookyHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpookyHasher")
            .field("length", &self.length)
            .field("remainder", &self.remainder)
            .finish_non_exhaustive()
    }
}

impl Hasher for SpookyHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(&self) -> u64 {
        self.final64()
    }
}

/// Builds seeded [`SpookyHasher`]s, for use with `HashMap`, `HashSet` and
/// friends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpookyBuildHasher {
    pub seed1: u64,
    pub seed2: u64,
}

impl SpookyBuildHasher {
    pub const fn with_seeds(seed1: u64, seed2: u64) -> Self {
        Self { seed1, seed2 }
    }

    pub const fn with_seed(seed: u64) -> Self {
        Self::with_seeds(seed, seed)
    }
}

impl BuildHasher for SpookyBuildHasher {
    type Hasher = SpookyHasher;

    fn build_hasher(&self) -> SpookyHasher {
        SpookyHasher::new(self.seed1, self.seed2)
    }
}

impl WellDistributed for SpookyBuildHasher {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        oneshot::{hash128, hash32, hash64},
    };
    use nanorand::{Rng, WyRand};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn random_message(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = WyRand::new_seed(seed);
        let mut message = vec![0u8; len];
        rng.fill_bytes(&mut message);
        message
    }

    #[test]
    fn single_update_matches_one_shot() {
        for len in 0..600 {
            let message = random_message(len, len as u64);
            let mut hasher = SpookyHasher::new(11, 13);
            hasher.update(&message);
            assert_eq!(hasher.final128(), hash128(&message, 11, 13), "len = {}", len);
        }
    }

    #[test]
    fn byte_at_a_time_matches_one_shot() {
        let message = random_message(700, 1);
        let mut hasher = SpookyHasher::new(3, 4);
        for (i, byte) in message.iter().enumerate() {
            hasher.update(std::slice::from_ref(byte));
            assert_eq!(hasher.final128(), hash128(&message[..=i], 3, 4), "len = {}", i + 1);
        }
    }

    #[test]
    fn splits_around_block_boundaries() {
        let message = random_message(500, 2);
        let expected = hash128(&message, 5, 6);
        for &split in &[1, 95, 96, 97, 150, 191, 192, 193, 287, 288, 289] {
            for &second in &[0, 1, 95, 96, 97, 191, 192] {
                let second_end = (split + second).min(message.len());
                let mut hasher = SpookyHasher::new(5, 6);
                hasher.update(&message[..split]);
                hasher.update(&message[split..second_end]);
                hasher.update(&message[second_end..]);
                assert_eq!(hasher.final128(), expected, "split = {}, second = {}", split, second);
            }
        }
    }

    #[test]
    fn finalizing_does_not_disturb_state() {
        let message = random_message(400, 3);
        let mut hasher = SpookyHasher::new(0, 0);
        hasher.update(&message[..250]);
        let first = hasher.final128();
        assert_eq!(hasher.final128(), first);
        hasher.update(&message[250..]);
        assert_eq!(hasher.final128(), hash128(&message, 0, 0));
    }

    #[test]
    fn init_resets() {
        let mut hasher = SpookyHasher::new(1, 2);
        hasher.update(&random_message(300, 4));
        hasher.init(7, 8);
        assert!(hasher.is_empty());
        hasher.update(b"abc");
        assert_eq!(hasher.final128(), hash128(b"abc", 7, 8));
    }

    #[test]
    fn update_range() {
        let message = random_message(64, 5);
        let mut hasher = SpookyHasher::default();
        hasher.update_range(&message, 10, 20).unwrap();
        assert_eq!(hasher.final128(), hash128(&message[10..30], 0, 0));

        assert_eq!(
            hasher.update_range(&message, 60, 5),
            Err(Error::OutOfRange {
                start: 60,
                len: 5,
                buffer_len: 64,
            })
        );
        assert_eq!(hasher.len(), 20);
    }

    #[test]
    fn utf16_chunks_match_contiguous_bytes() {
        let text = "spooky ".repeat(40);
        let bytes: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
        let mut hasher = SpookyHasher::default();
        hasher.update_str(&text);
        assert_eq!(hasher.final128(), hash128(&bytes, 0, 0));
    }

    #[test]
    fn build_hasher_works_in_hash_map() {
        let mut map = HashMap::with_hasher(SpookyBuildHasher::with_seed(42));
        for i in 0..100u32 {
            map.insert(i.to_string(), i);
        }
        for i in 0..100u32 {
            assert_eq!(map.get(&i.to_string()), Some(&i));
        }
    }

    #[test]
    fn hasher_finish_is_low_half() {
        let mut hasher = SpookyBuildHasher::with_seeds(9, 10).build_hasher();
        hasher.write(b"hello world");
        assert_eq!(hasher.finish(), hash128(b"hello world", 9, 10).0);
    }

    #[test]
    fn narrower_finals_match_one_shot() {
        for len in [0, 11, 191, 192, 300] {
            let message = random_message(len, 6);
            let mut hasher = SpookyHasher::new(42, 42);
            hasher.update(&message);
            assert_eq!(hasher.final64(), hash64(&message, 42), "len {}", len);
            assert_eq!(hasher.final32(), hash32(&message, 42), "len {}", len);
        }
    }

    proptest! {
        #[test]
        fn any_partition_matches_one_shot(
            message in proptest::collection::vec(any::<u8>(), 0..1000),
            cuts in proptest::collection::vec(any::<usize>(), 0..8),
            seed1 in any::<u64>(),
            seed2 in any::<u64>(),
        ) {
            let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (message.len() + 1)).collect();
            cuts.sort_unstable();

            let mut hasher = SpookyHasher::new(seed1, seed2);
            let mut start = 0;
            for cut in cuts {
                hasher.update(&message[start..cut]);
                start = cut;
            }
            hasher.update(&message[start..]);

            prop_assert_eq!(hasher.final128(), hash128(&message, seed1, seed2));
        }
    }
}
