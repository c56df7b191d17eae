//! Stream adapters that hash everything passing through them.

use std::io::{self, Read, Write};

use crate::{hash_code::HashCode128, hasher::SpookyHasher};

/// A reader that hashes every byte read through it.
#[derive(Debug)]
pub struct HashingReader<R> {
    inner: R,
    hasher: SpookyHasher,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R, seed1: u64, seed2: u64) -> Self {
        Self {
            inner,
            hasher: SpookyHasher::new(seed1, seed2),
        }
    }

    /// The digest of everything read so far.
    pub fn current_hash(&self) -> HashCode128 {
        self.hasher.final_hash_code()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// A writer that hashes every byte the wrapped writer accepts.
#[derive(Debug)]
pub struct HashingWriter<W> {
    inner: W,
    hasher: SpookyHasher,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W, seed1: u64, seed2: u64) -> Self {
        Self {
            inner,
            hasher: SpookyHasher::new(seed1, seed2),
        }
    }

    /// The digest of everything written so far.
    pub fn current_hash(&self) -> HashCode128 {
        self.hasher.final_hash_code()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Only what the inner writer took; the caller retries the rest.
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Reads `reader` to the end and returns the digest of its contents.
pub fn hash_reader<R: Read>(mut reader: R, seed1: u64, seed2: u64) -> io::Result<HashCode128> {
    let mut sink = HashingWriter::new(io::sink(), seed1, seed2);
    io::copy(&mut reader, &mut sink)?;
    Ok(sink.current_hash())
}
