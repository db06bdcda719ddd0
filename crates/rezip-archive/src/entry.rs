/// Unix file-type mask and the directory and symbolic-link types, as stored in
/// the upper half of a ZIP entry's external attributes.
const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFLNK: u32 = 0o120000;

/// Read-only metadata for one member of the source archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    /// Position in the archive's central directory.
    pub index: usize,
    /// Full stored path, e.g. `docs/img/logo.png`.
    pub path:  String,
    /// Uncompressed size in bytes.
    pub size:  u64,
    pub mode:  Option<u32>,
    pub is_directory: bool,
}

impl SourceEntry {
    pub fn new(index: usize, path: impl Into<String>, size: u64) -> Self {
        Self {
            index,
            path: path.into(),
            size,
            mode: None,
            is_directory: false,
        }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn directory(mut self) -> Self {
        self.is_directory = true;
        self
    }

    /// A trailing-slash name or directory file-type bits. MS-DOS directory
    /// attributes surface through `unix_mode` as `S_IFDIR` too.
    pub fn is_dir(&self) -> bool {
        self.is_directory || self.mode.is_some_and(|m| m & S_IFMT == S_IFDIR)
    }

    /// Detected from the file-type bits; the link is never followed.
    pub fn is_symlink(&self) -> bool {
        self.mode.is_some_and(|m| m & S_IFMT == S_IFLNK)
    }

    /// Final path component, with every directory segment stripped.
    pub fn flattened_name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|c| !c.is_empty())
    }
}
