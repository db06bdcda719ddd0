use std::io::{self, Read};

use crate::{ContentHash, Hasher, Sha256Hasher};

const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming reader that hashes data as it passes through.
/// Wraps any `Read` source so content is read once for both copying and hashing.
pub struct HashingReader<R, H> {
    reader: R,
    hasher: H,
}

impl<R, H> HashingReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self { Self { reader, hasher } }
}

impl<R: Read, H: Hasher> Read for HashingReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if n > 0 {
            self.hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}

impl<R: Read, H: Hasher> HashingReader<R, H> {
    /// Consume the reader and return the digest of everything read.
    pub fn finish(self) -> H::Output { self.hasher.finalize() }
}

/// Drain `reader` and return its SHA-256 digest.
pub fn sha256_reader<R: Read>(reader: R) -> io::Result<ContentHash> {
    let mut hashing = HashingReader::new(reader, Sha256Hasher::new());
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        if hashing.read(&mut buffer)? == 0 {
            break;
        }
    }
    Ok(hashing.finish())
}
