use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("argument `{name}` must not be absent")]
    NullArgument { name: &'static str },
    #[error("range of {len} bytes starting at {start} is out of bounds for a buffer of {buffer_len} bytes")]
    OutOfRange {
        start: usize,
        len: usize,
        buffer_len: usize,
    },
    #[error("malformed 128-bit hash code: {0}")]
    Format(#[from] FormatError),
}

/// Ways a textual 128-bit hash code can be malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected 32 hexadecimal digits, found {0}")]
    WrongDigitCount(usize),
    #[error("invalid character {ch:?} at byte {index}")]
    InvalidCharacter { ch: char, index: usize },
    #[error("repeated `0x` prefix at byte {index}")]
    RepeatedPrefix { index: usize },
}
