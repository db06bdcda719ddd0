use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{AtomicWriteOptions, Error, Result};

/// A file written next to its final location and renamed into place on commit.
///
/// Dropping an uncommitted `StagedFile` removes the temporary file, so the
/// target is either fully replaced or left untouched.
pub struct StagedFile {
    file:    NamedTempFile,
    target:  PathBuf,
    options: AtomicWriteOptions,
}

impl StagedFile {
    pub fn new(target: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(target, AtomicWriteOptions::new())
    }

    pub fn with_options(target: impl AsRef<Path>, options: AtomicWriteOptions) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        let dir = parent_dir(&target);

        let file = tempfile::Builder::new()
            .prefix(options.prefix_str())
            .suffix(options.suffix_str())
            .tempfile_in(dir)
            .map_err(|source| Error::Stage {
                dir: dir.to_path_buf(),
                source,
            })?;

        tracing::trace!(staging = %file.path().display(), target = %target.display(), "staging file");

        Ok(Self {
            file,
            target,
            options,
        })
    }

    /// Path of the temporary file.
    pub fn path(&self) -> &Path { self.file.path() }

    pub fn file_mut(&mut self) -> &mut File { self.file.as_file_mut() }

    /// Flush, apply permissions and rename over the target.
    pub fn commit(self) -> Result<()> {
        let Self {
            file,
            target,
            options,
        } = self;

        if options.sync_enabled() {
            file.as_file().sync_all().map_err(|source| Error::Write {
                path: file.path().to_path_buf(),
                source,
            })?;
        }

        if let Some(perms) = options.into_permissions() {
            std::fs::set_permissions(file.path(), perms).map_err(|source| Error::Write {
                path: file.path().to_path_buf(),
                source,
            })?;
        }

        file.persist(&target).map_err(|e| Error::Commit {
            path:   target.clone(),
            source: e.error,
        })?;

        tracing::debug!(target = %target.display(), "committed staged file");
        Ok(())
    }
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_commit_replaces_target() -> Result<()> {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"old").unwrap();

        let mut staged = StagedFile::new(&target)?;
        staged.file_mut().write_all(b"new").unwrap();
        let staging_path = staged.path().to_path_buf();
        staged.commit()?;

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        assert!(!staging_path.exists());
        Ok(())
    }

    #[test]
    fn test_drop_discards_staging_and_keeps_target() -> Result<()> {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.bin");
        std::fs::write(&target, b"old").unwrap();

        let staging_path = {
            let mut staged = StagedFile::new(&target)?;
            staged.file_mut().write_all(b"partial").unwrap();
            staged.path().to_path_buf()
        };

        assert!(!staging_path.exists());
        assert_eq!(std::fs::read(&target).unwrap(), b"old");
        Ok(())
    }

    #[test]
    fn test_stage_fails_when_parent_missing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing").join("out.bin");
        assert!(matches!(StagedFile::new(&target), Err(Error::Stage { .. })));
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("out.zip")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/out.zip")), Path::new("a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_commit_applies_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let target = dir.path().join("out.bin");
        let staged = StagedFile::with_options(&target, AtomicWriteOptions::new().permissions(0o640))?;
        staged.commit()?;

        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        Ok(())
    }
}
