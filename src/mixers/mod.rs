//! The SpookyHash V2 mixing core.
//!
//! There are two algorithms.  Messages shorter than [`BUF_SIZE`] bytes go
//! through the [`short`] path, which mixes four words of state 32 bytes at a
//! time.  Everything else goes through the [`long`] path, which absorbs
//! [`BLOCK_SIZE`]-byte blocks into twelve words of state.  Both are pure
//! functions: the one-shot entry points and the incremental hasher only
//! decide what to feed them.
//!
//! All words are read little-endian, regardless of host.

pub mod long;
pub mod short;

/// Initial value for the accumulators that don't receive a seed.  Any odd
/// constant with an irregular mix of bits would do, but the digest depends on
/// this exact value.
pub const SC_CONST: u64 = 0xdeadbeefdeadbeef;

/// Number of 64-bit words of state in the long algorithm.
pub const NUM_VARS: usize = 12;

/// Size in bytes of a block absorbed by the long algorithm.
pub const BLOCK_SIZE: usize = NUM_VARS * 8;

/// Messages shorter than this many bytes use the short algorithm.
pub const BUF_SIZE: usize = 2 * BLOCK_SIZE;

/// Fetches the little-endian 64-bit word at byte offset `i`.
#[inline(always)]
pub(crate) fn read_u64(bytes: &[u8], i: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[i..(i + 8)]);
    u64::from_le_bytes(word)
}

/// Reads the first `BLOCK_SIZE` bytes of `bytes` as a block of words.
#[inline(always)]
pub(crate) fn read_block(bytes: &[u8]) -> [u64; NUM_VARS] {
    let mut block = [0u64; NUM_VARS];
    for (i, word) in block.iter_mut().enumerate() {
        *word = read_u64(bytes, i * 8);
    }
    block
}

/// Copies mixed state words out as little-endian bytes.
pub(crate) fn write_state(state: &[u64], out_bytes: &mut [u8]) {
    for (word, out) in state.iter().zip(out_bytes.chunks_exact_mut(8)) {
        out.copy_from_slice(&word.to_le_bytes());
    }
}
