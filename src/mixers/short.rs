//! The short-message path of SpookyHash V2, used for messages under
//! `BUF_SIZE` bytes.  It has a much lower startup cost than the block
//! absorber, which matters because most hashed keys are short.

use super::{read_u64, write_state, SC_CONST};

pub const IN_SIZE_BYTES: usize = 256 / 8;
pub const OUT_SIZE_BYTES: usize = 256 / 8;
pub const DIGEST_SIZE_BYTES: usize = 128 / 8;

/// Bytes consumed per round of the short path.
pub const CHUNK_SIZE: usize = 32;

/// Mixes all four words of state.  Each step rotates one word, adds its
/// successor and xors the result into the word after that, cycling through
/// `c, d, a, b`.
#[inline(always)]
pub fn short_mix(h: &mut [u64; 4]) {
    const ROTATIONS: [u32; 12] = [50, 52, 30, 41, 54, 48, 38, 37, 62, 34, 5, 36];

    for (i, &rot) in ROTATIONS.iter().enumerate() {
        let x = (i + 2) % 4;
        let y = (i + 3) % 4;
        let z = i % 4;
        h[x] = h[x].rotate_left(rot);
        h[x] = h[x].wrapping_add(h[y]);
        h[z] ^= h[x];
    }
}

/// Final diffusion of the short path's state, after the tail and length have
/// been folded in.  Cycles through `d, a, b, c`.
#[inline(always)]
pub fn short_end(h: &mut [u64; 4]) {
    const ROTATIONS: [u32; 11] = [15, 52, 26, 51, 28, 9, 47, 54, 32, 25, 63];

    for (i, &rot) in ROTATIONS.iter().enumerate() {
        let x = (i + 3) % 4;
        let y = (i + 2) % 4;
        h[x] ^= h[y];
        h[y] = h[y].rotate_left(rot);
        h[x] = h[x].wrapping_add(h[y]);
    }
}

/// Absorbs one full 32-byte chunk.
#[inline(always)]
fn absorb_chunk(h: &mut [u64; 4], chunk: &[u8]) {
    h[2] = h[2].wrapping_add(read_u64(chunk, 0));
    h[3] = h[3].wrapping_add(read_u64(chunk, 8));
    short_mix(h);
    h[0] = h[0].wrapping_add(read_u64(chunk, 16));
    h[1] = h[1].wrapping_add(read_u64(chunk, 24));
}

/// Hashes a message of fewer than `BUF_SIZE` bytes, returning both halves of
/// the 128-bit digest.
pub fn hash_short(message: &[u8], seed1: u64, seed2: u64) -> (u64, u64) {
    debug_assert!(message.len() < super::BUF_SIZE);

    let mut h = [seed1, seed2, SC_CONST, SC_CONST];

    let mut chunks = message.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        absorb_chunk(&mut h, chunk);
    }

    // Half a chunk or more left over gets one more abbreviated round.
    let mut tail = chunks.remainder();
    if tail.len() >= 16 {
        h[2] = h[2].wrapping_add(read_u64(tail, 0));
        h[3] = h[3].wrapping_add(read_u64(tail, 8));
        short_mix(&mut h);
        tail = &tail[16..];
    }

    h[3] = h[3].wrapping_add((message.len() as u64) << 56);

    // The last 0..15 bytes land in `c` then `d`, little-endian, with the
    // unused high bytes left as zero.
    if tail.is_empty() {
        h[2] = h[2].wrapping_add(SC_CONST);
        h[3] = h[3].wrapping_add(SC_CONST);
    } else {
        let mut padded = [0u8; 16];
        padded[..tail.len()].copy_from_slice(tail);
        h[2] = h[2].wrapping_add(read_u64(&padded, 0));
        h[3] = h[3].wrapping_add(read_u64(&padded, 8));
    }

    short_end(&mut h);

    (h[0], h[1])
}

/// The short path's 32-byte absorber, exposed for diffusion analysis.  A
/// single chunk is fed into a zero-seeded state, and the full 256-bit state
/// is the output.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut h = [0, 0, SC_CONST, SC_CONST];
    absorb_chunk(&mut h, in_bytes);

    write_state(&h, out_bytes);
}
