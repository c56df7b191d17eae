//! Hashing a whole message in one call, without a [`SpookyHasher`].

use std::ops::Range;

use crate::{
    error::{Error, Result},
    hash_code::HashCode128,
    hasher::SpookyHasher,
    mixers::{long, short, BUF_SIZE},
};

/// The 128-bit SpookyHash V2 digest of `message`.
pub fn hash128(message: &[u8], seed1: u64, seed2: u64) -> (u64, u64) {
    if message.len() < BUF_SIZE {
        short::hash_short(message, seed1, seed2)
    } else {
        long::hash_long(message, seed1, seed2)
    }
}

/// The 64-bit digest: the first half of the 128-bit digest, with `seed` as
/// both seeds.
pub fn hash64(message: &[u8], seed: u64) -> u64 {
    hash128(message, seed, seed).0
}

/// The 32-bit digest: the low bits of `hash64`.
pub fn hash32(message: &[u8], seed: u32) -> u32 {
    hash64(message, seed as u64) as u32
}

pub fn hash_code128(message: &[u8], seed1: u64, seed2: u64) -> HashCode128 {
    hash128(message, seed1, seed2).into()
}

/// The 128-bit digest of the `len` bytes of `message` starting at `start`.
pub fn hash128_range(
    message: &[u8],
    start: usize,
    len: usize,
    seed1: u64,
    seed2: u64,
) -> Result<(u64, u64)> {
    let range = checked_range(message.len(), start, len)?;
    Ok(hash128(&message[range], seed1, seed2))
}

/// The 128-bit digest of UTF-16 code units, each hashed as two little-endian
/// bytes.
pub fn hash128_utf16(units: &[u16], seed1: u64, seed2: u64) -> (u64, u64) {
    let mut hasher = SpookyHasher::new(seed1, seed2);
    hasher.update_utf16(units.iter().copied());
    hasher.final128()
}

/// The 128-bit digest of the UTF-16 encoding of `s`.
pub fn hash128_str(s: &str, seed1: u64, seed2: u64) -> (u64, u64) {
    let mut hasher = SpookyHasher::new(seed1, seed2);
    hasher.update_str(s);
    hasher.final128()
}

pub(crate) fn checked_range(buffer_len: usize, start: usize, len: usize) -> Result<Range<usize>> {
    match start.checked_add(len) {
        Some(end) if end <= buffer_len => Ok(start..end),
        _ => Err(Error::OutOfRange {
            start,
            len,
            buffer_len,
        }),
    }
}
