//! Content fingerprints for archive entries.
//!
//! Provides incremental SHA-256 hashing over any `Read` source so that an
//! entry can be copied and fingerprinted in a single pass.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use rezip_verify::{HashingReader, Sha256Hasher};
//!
//! let data = b"hello world";
//! let expected = Sha256Hasher::digest(data);
//!
//! let mut reader = HashingReader::new(&data[..], Sha256Hasher::new());
//! let mut buffer = Vec::new();
//! reader.read_to_end(&mut buffer).unwrap();
//!
//! assert_eq!(buffer, data);
//! assert_eq!(reader.finish(), expected);
//! ```

pub use self::error::{Result, VerifyError};
pub use self::hash::ContentHash;
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::{HashingReader, sha256_reader};

mod error;
mod hash;
mod hasher;
mod reader;
