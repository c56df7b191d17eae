//! SpookyHash V2, Bob Jenkins' fast non-cryptographic hash, producing 32, 64
//! and 128-bit digests.
//!
//! ```
//! use spookyhash::{hash128, SpookyHasher};
//!
//! let one_shot = hash128(b"hello world", 0, 0);
//!
//! let mut hasher = SpookyHasher::new(0, 0);
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.final128(), one_shot);
//! ```
//!
//! Words are read little-endian on every host.  SpookyHash is not a
//! cryptographic hash: it offers no resistance to deliberate collisions
//! beyond what secret seeds provide.

pub mod error;
pub mod hash_code;
pub mod hasher;
pub mod io;
pub mod mixers;
pub mod oneshot;
pub mod rehash;
pub mod stats;

pub use error::{Error, FormatError, Result};
pub use hash_code::HashCode128;
pub use hasher::{SpookyBuildHasher, SpookyHasher};
pub use oneshot::{
    hash128, hash128_range, hash128_str, hash128_utf16, hash32, hash64, hash_code128,
};
pub use rehash::{
    rehash32, rehash32_unseeded, rehash64, rehash64_unseeded, Redistribute, WellDistributed,
};
