//! Digests checked against fixed vectors.  The inputs follow Bob Jenkins'
//! test program: a message of length `n` is the bytes `128, 129, ...` up to
//! `n` bytes, wrapping at 256.

use spookyhash::{hash128, hash32, hash64, HashCode128, SpookyHasher};

fn jenkins_buffer(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i + 128) as u8).collect()
}

// The first entries of the published 32-bit results, seed 0.
const PUBLISHED_HASH32: [u32; 16] = [
    0x6bf50919, 0x70de1d26, 0xa2b37298, 0x35bc5fbf, 0x8223b279, 0x5bcb315e, 0x53fe88a1,
    0xf9f1a233, 0xee193982, 0x54f86f29, 0xc8772d36, 0x9ed60886, 0x5f23d1da, 0x1ed9f474,
    0xf2ef0c89, 0x83ec01f9,
];

const UNSEEDED: &[(usize, (u64, u64))] = &[
    (0, (0x232706fc6bf50919, 0x8b72ee65b4e851c7)),
    (1, (0xa3bf77d970de1d26, 0x7585c07813503b1b)),
    (15, (0x68e09c3383ec01f9, 0x03fc84b7e6beb112)),
    (16, (0x8d4789b8f274736c, 0x571fc8b06e34f05d)),
    (31, (0xf99c41b7027bca7c, 0xb7f22776b43a1e77)),
    (32, (0x8382f14fe5cfc8b6, 0x97bee62a5b8d415e)),
    (95, (0x792b56723abae1cb, 0xb490b0d4269e5fd1)),
    (96, (0x37d30c651499b81a, 0x045532f32c53d362)),
    (97, (0xd0d4c35da2993951, 0x5648c75caf6609e7)),
    (191, (0x57067b56e13d9e19, 0x2f4af0dc8be304d6)),
    (192, (0x246ed6ee77e012bd, 0xd3aeed226839e477)),
    (193, (0x2cc90c582d05114c, 0x8d535d63e790b65c)),
    (287, (0xae8b1714c22c642d, 0x40c6aadcaa589c12)),
    (288, (0x4371099947880140, 0x34556b92bc6745a9)),
    (511, (0x7195ceb7cc1c8250, 0x2e1729409b8fd713)),
    (512, (0x51deccb3df8499ae, 0x2e2579aaa0dc70a0)),
];

const SEED1: u64 = 0x0123456789abcdef;
const SEED2: u64 = 0xfedcba9876543210;

const SEEDED: &[(usize, (u64, u64))] = &[
    (0, (0x9650bc819f542799, 0xf0d126948b81e07f)),
    (7, (0x5a27a897e75614d1, 0xd782295605eaca32)),
    (95, (0xc74bfa17c83e0b8e, 0x446ba5f9404db489)),
    (96, (0xbe42ef3503c388fb, 0x3d80eec18328812e)),
    (191, (0x00048f3f2814b6bc, 0x714bbb0e1a7162dc)),
    (192, (0x1d58c9181e4d0353, 0xf9be7682ec7143c3)),
    (300, (0xd15499d426d39739, 0xa67a2acc9484efe9)),
];

#[test]
fn published_hash32_results() {
    for (len, &expected) in PUBLISHED_HASH32.iter().enumerate() {
        assert_eq!(hash32(&jenkins_buffer(len), 0), expected, "len = {}", len);
    }
}

#[test]
fn unseeded_vectors() {
    for &(len, expected) in UNSEEDED {
        let message = jenkins_buffer(len);
        assert_eq!(hash128(&message, 0, 0), expected, "len = {}", len);
        assert_eq!(hash64(&message, 0), expected.0, "len = {}", len);
        assert_eq!(hash32(&message, 0), expected.0 as u32, "len = {}", len);
    }
}

#[test]
fn seeded_vectors() {
    for &(len, expected) in SEEDED {
        assert_eq!(hash128(&jenkins_buffer(len), SEED1, SEED2), expected, "len = {}", len);
    }
}

#[test]
fn incremental_vectors_across_boundaries() {
    for &(len, expected) in UNSEEDED {
        let message = jenkins_buffer(len);
        for split in [0, 1, 95, 96, 97, 191, 192, 193] {
            if split > len {
                continue;
            }
            let mut hasher = SpookyHasher::new(0, 0);
            hasher.update(&message[..split]);
            hasher.update(&message[split..]);
            assert_eq!(hasher.final128(), expected, "len = {}, split = {}", len, split);
        }
    }
}

#[test]
fn hello_world() {
    let hash = HashCode128::from(hash128(b"hello world", 0, 0));
    assert_eq!(hash.to_string(), "CE4E98819BFF125D8BE188EE0D3F1025");
}

#[test]
fn repeated_calls_are_deterministic() {
    let message = jenkins_buffer(300);
    let first = hash128(&message, 1, 2);
    for _ in 0..10 {
        assert_eq!(hash128(&message, 1, 2), first);
    }
}
