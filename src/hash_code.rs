//! The 128-bit digest value.

use std::{
    fmt::{self, Display, Formatter, LowerHex, UpperHex},
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::error::{Error, FormatError, Result};

/// Number of hex digits in the textual form of a `HashCode128`.
pub const HEX_DIGITS: usize = 128 / 4;

/// A 128-bit hash value, as two 64-bit halves.
///
/// Its textual form is 32 uppercase hex digits, `hash1` first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashCode128 {
    hash1: u64,
    hash2: u64,
}

impl HashCode128 {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(hash1: u64, hash2: u64) -> Self {
        Self { hash1, hash2 }
    }

    /// Builds a hash code from signed halves.  The bit patterns are kept
    /// as-is, so this is equal to `new` on the same bits.
    pub const fn from_signed(hash1: i64, hash2: i64) -> Self {
        Self::new(hash1 as u64, hash2 as u64)
    }

    pub const fn from_u128(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }

    pub const fn to_u128(self) -> u128 {
        ((self.hash1 as u128) << 64) | self.hash2 as u128
    }

    pub const fn hash1(&self) -> u64 {
        self.hash1
    }

    pub const fn hash2(&self) -> u64 {
        self.hash2
    }

    pub const fn is_zero(&self) -> bool {
        self.hash1 == 0 && self.hash2 == 0
    }

    /// A 32-bit hash of this hash code: the low bits of `hash1`.
    ///
    /// The value is already well distributed, so it isn't mixed again.
    pub const fn hash_code(&self) -> u32 {
        self.hash1 as u32
    }

    /// Parses 32 hex digits, in either case.
    ///
    /// Whitespace is ignored wherever it appears.  A single `0x` or `0X` may
    /// come before the first digit.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(Self::from_u128(parse_hex_digits(s)?))
    }

    /// Like `parse`, for text that may be absent.
    pub fn parse_optional(s: Option<&str>) -> Result<Self> {
        match s {
            Some(s) => Self::parse(s),
            None => Err(Error::NullArgument { name: "s" }),
        }
    }

    /// Like `parse`, discarding the reason for failure.
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }
}

fn parse_hex_digits(s: &str) -> std::result::Result<u128, FormatError> {
    let mut value = 0u128;
    let mut digits = 0;
    let mut prefixed = false;

    let mut chars = s.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        if ch == '0' && digits == 0 && matches!(chars.peek(), Some((_, 'x' | 'X'))) {
            if prefixed {
                return Err(FormatError::RepeatedPrefix { index });
            }
            prefixed = true;
            chars.next();
            continue;
        }

        let nibble = ch
            .to_digit(16)
            .ok_or(FormatError::InvalidCharacter { ch, index })?;

        // Extra digits shift out the top; the count below rejects them.
        value = (value << 4) | nibble as u128;
        digits += 1;
    }

    if digits != HEX_DIGITS {
        return Err(FormatError::WrongDigitCount(digits));
    }

    Ok(value)
}

impl FromStr for HashCode128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Display for HashCode128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let value = self.to_u128();
        let mut buf = [0u8; HEX_DIGITS];
        for (i, digit) in buf.iter_mut().enumerate() {
            let shift = 4 * (HEX_DIGITS - 1 - i);
            *digit = DIGITS[((value >> shift) & 0xf) as usize];
        }

        // Every byte comes from `DIGITS`, so this never fails.
        let text = std::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

impl UpperHex for HashCode128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:016X}{:016X}", self.hash1, self.hash2)
    }
}

impl LowerHex for HashCode128 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:016x}{:016x}", self.hash1, self.hash2)
    }
}

impl Hash for HashCode128 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl From<(u64, u64)> for HashCode128 {
    fn from((hash1, hash2): (u64, u64)) -> Self {
        Self::new(hash1, hash2)
    }
}

impl From<HashCode128> for (u64, u64) {
    fn from(hash: HashCode128) -> Self {
        (hash.hash1, hash.hash2)
    }
}

impl From<u128> for HashCode128 {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<HashCode128> for u128 {
    fn from(hash: HashCode128) -> Self {
        hash.to_u128()
    }
}
