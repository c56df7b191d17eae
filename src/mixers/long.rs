//! The block-oriented path of SpookyHash V2, used for messages of `BUF_SIZE`
//! bytes or more.

use super::{read_block, write_state, BLOCK_SIZE, NUM_VARS, SC_CONST};

pub const IN_SIZE_BYTES: usize = 768 / 8;
pub const OUT_SIZE_BYTES: usize = 768 / 8;
pub const DIGEST_SIZE_BYTES: usize = 128 / 8;

/// The state before any block has been absorbed: the seeds and `SC_CONST`
/// repeated across all twelve words.
#[inline]
pub fn initial_state(seed1: u64, seed2: u64) -> [u64; NUM_VARS] {
    [
        seed1, seed2, SC_CONST, //
        seed1, seed2, SC_CONST, //
        seed1, seed2, SC_CONST, //
        seed1, seed2, SC_CONST,
    ]
}

/// Absorbs one block.  This is the inner loop of the long path.
#[inline(always)]
#[rustfmt::skip]
pub fn mix_block(s: &mut [u64; NUM_VARS], data: &[u64; NUM_VARS]) {
    s[0]  = s[0].wrapping_add(data[0]);   s[2]  ^= s[10]; s[11] ^= s[0];  s[0]  = s[0].rotate_left(11);  s[11] = s[11].wrapping_add(s[1]);
    s[1]  = s[1].wrapping_add(data[1]);   s[3]  ^= s[11]; s[0]  ^= s[1];  s[1]  = s[1].rotate_left(32);  s[0]  = s[0].wrapping_add(s[2]);
    s[2]  = s[2].wrapping_add(data[2]);   s[4]  ^= s[0];  s[1]  ^= s[2];  s[2]  = s[2].rotate_left(43);  s[1]  = s[1].wrapping_add(s[3]);
    s[3]  = s[3].wrapping_add(data[3]);   s[5]  ^= s[1];  s[2]  ^= s[3];  s[3]  = s[3].rotate_left(31);  s[2]  = s[2].wrapping_add(s[4]);
    s[4]  = s[4].wrapping_add(data[4]);   s[6]  ^= s[2];  s[3]  ^= s[4];  s[4]  = s[4].rotate_left(17);  s[3]  = s[3].wrapping_add(s[5]);
    s[5]  = s[5].wrapping_add(data[5]);   s[7]  ^= s[3];  s[4]  ^= s[5];  s[5]  = s[5].rotate_left(28);  s[4]  = s[4].wrapping_add(s[6]);
    s[6]  = s[6].wrapping_add(data[6]);   s[8]  ^= s[4];  s[5]  ^= s[6];  s[6]  = s[6].rotate_left(39);  s[5]  = s[5].wrapping_add(s[7]);
    s[7]  = s[7].wrapping_add(data[7]);   s[9]  ^= s[5];  s[6]  ^= s[7];  s[7]  = s[7].rotate_left(57);  s[6]  = s[6].wrapping_add(s[8]);
    s[8]  = s[8].wrapping_add(data[8]);   s[10] ^= s[6];  s[7]  ^= s[8];  s[8]  = s[8].rotate_left(55);  s[7]  = s[7].wrapping_add(s[9]);
    s[9]  = s[9].wrapping_add(data[9]);   s[11] ^= s[7];  s[8]  ^= s[9];  s[9]  = s[9].rotate_left(54);  s[8]  = s[8].wrapping_add(s[10]);
    s[10] = s[10].wrapping_add(data[10]); s[0]  ^= s[8];  s[9]  ^= s[10]; s[10] = s[10].rotate_left(22); s[9]  = s[9].wrapping_add(s[11]);
    s[11] = s[11].wrapping_add(data[11]); s[1]  ^= s[9];  s[10] ^= s[11]; s[11] = s[11].rotate_left(46); s[10] = s[10].wrapping_add(s[0]);
}

/// One pass of the final diffusion, coupling each word with its neighbours
/// around the ring.
#[inline(always)]
#[rustfmt::skip]
pub fn end_partial(h: &mut [u64; NUM_VARS]) {
    h[11] = h[11].wrapping_add(h[1]);  h[2]  ^= h[11]; h[1]  = h[1].rotate_left(44);
    h[0]  = h[0].wrapping_add(h[2]);   h[3]  ^= h[0];  h[2]  = h[2].rotate_left(15);
    h[1]  = h[1].wrapping_add(h[3]);   h[4]  ^= h[1];  h[3]  = h[3].rotate_left(34);
    h[2]  = h[2].wrapping_add(h[4]);   h[5]  ^= h[2];  h[4]  = h[4].rotate_left(21);
    h[3]  = h[3].wrapping_add(h[5]);   h[6]  ^= h[3];  h[5]  = h[5].rotate_left(38);
    h[4]  = h[4].wrapping_add(h[6]);   h[7]  ^= h[4];  h[6]  = h[6].rotate_left(33);
    h[5]  = h[5].wrapping_add(h[7]);   h[8]  ^= h[5];  h[7]  = h[7].rotate_left(10);
    h[6]  = h[6].wrapping_add(h[8]);   h[9]  ^= h[6];  h[8]  = h[8].rotate_left(13);
    h[7]  = h[7].wrapping_add(h[9]);   h[10] ^= h[7];  h[9]  = h[9].rotate_left(38);
    h[8]  = h[8].wrapping_add(h[10]);  h[11] ^= h[8];  h[10] = h[10].rotate_left(53);
    h[9]  = h[9].wrapping_add(h[11]);  h[0]  ^= h[9];  h[11] = h[11].rotate_left(42);
    h[10] = h[10].wrapping_add(h[0]);  h[1]  ^= h[10]; h[0]  = h[0].rotate_left(54);
}

/// Adds the final block into the state, then diffuses it three times over.
#[inline(always)]
pub fn end(h: &mut [u64; NUM_VARS], data: &[u64; NUM_VARS]) {
    for (word, &d) in h.iter_mut().zip(data.iter()) {
        *word = word.wrapping_add(d);
    }
    end_partial(h);
    end_partial(h);
    end_partial(h);
}

/// Finishes the state with the last partial block (0 to `BLOCK_SIZE - 1`
/// bytes).  The block is zero padded and its final byte holds the tail
/// length, which is the only way the tail length reaches the digest.
pub(crate) fn finish(h: &mut [u64; NUM_VARS], tail: &[u8]) {
    debug_assert!(tail.len() < BLOCK_SIZE);

    let mut last = [0u8; BLOCK_SIZE];
    last[..tail.len()].copy_from_slice(tail);
    last[BLOCK_SIZE - 1] = tail.len() as u8;

    end(h, &read_block(&last));
}

/// Hashes a message of `BUF_SIZE` bytes or more, returning both halves of the
/// 128-bit digest.
pub fn hash_long(message: &[u8], seed1: u64, seed2: u64) -> (u64, u64) {
    let mut h = initial_state(seed1, seed2);

    let mut blocks = message.chunks_exact(BLOCK_SIZE);
    for block in &mut blocks {
        mix_block(&mut h, &read_block(block));
    }
    finish(&mut h, blocks.remainder());

    (h[0], h[1])
}

/// The block absorber, exposed for diffusion analysis.  A single block is
/// absorbed into a zero-seeded state and the whole 768-bit state is the
/// output, without any of the end mixing.
pub fn mix_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    assert!(in_bytes.len() == IN_SIZE_BYTES);
    assert!(out_bytes.len() == OUT_SIZE_BYTES);

    let mut state = initial_state(0, 0);
    mix_block(&mut state, &read_block(in_bytes));

    write_state(&state, out_bytes);
}
