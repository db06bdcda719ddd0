//! Staged and atomic file placement.
//!
//! Every write lands in a temporary file inside the destination directory and
//! is renamed over the destination only once it is complete.

mod error;
mod staged;

pub use error::{Error, Result};
pub use staged::StagedFile;

use std::fs::File;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
const DEFAULT_PERMISSIONS: u32 = 0o644;

#[cfg(not(unix))]
const DEFAULT_PERMISSIONS: u32 = 0;

#[derive(Clone, Copy, Debug)]
pub struct AtomicWriteOptions {
    permissions: u32,
    prefix:      &'static str,
    suffix:      &'static str,
    sync:        bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self { Self::new() }
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self {
            permissions: DEFAULT_PERMISSIONS,
            prefix:      ".",
            suffix:      ".tmp",
            sync:        true,
        }
    }

    #[cfg(unix)]
    pub fn permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }

    #[cfg(not(unix))]
    pub fn permissions(self, _permissions: u32) -> Self { self }

    pub fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    #[cfg(unix)]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> {
        Some(std::fs::Permissions::from_mode(self.permissions))
    }

    #[cfg(not(unix))]
    pub fn into_permissions(self) -> Option<std::fs::Permissions> { None }

    pub fn prefix_str(&self) -> &'static str { self.prefix }

    pub fn suffix_str(&self) -> &'static str { self.suffix }

    pub fn sync_enabled(&self) -> bool { self.sync }
}

/// Atomically replace `path` with whatever `write` produces.
///
/// If `write` fails the destination is left untouched.
pub fn atomic_write_with<F>(path: impl AsRef<Path>, options: AtomicWriteOptions, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut staged = StagedFile::with_options(path, options)?;
    write(staged.file_mut()).map_err(|source| Error::Write {
        path: staged.path().to_path_buf(),
        source,
    })?;
    staged.commit()
}

pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    use std::io::Write;
    atomic_write_with(path, options, |file| file.write_all(content))
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}
