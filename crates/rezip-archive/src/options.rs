/// Basenames of OS metadata files that are never repacked.
pub const DEFAULT_SKIP_NAMES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Path components marking OS metadata trees.
pub const DEFAULT_SKIP_DIRS: &[&str] = &["__MACOSX"];

#[derive(Clone, Debug)]
pub struct RepackOptions {
    pub skip_names: Vec<String>,
    pub skip_dirs:  Vec<String>,
    /// Stage the output next to the destination and rename it into place on success.
    pub atomic:     bool,
}

impl Default for RepackOptions {
    fn default() -> Self {
        Self {
            skip_names: DEFAULT_SKIP_NAMES.iter().map(|s| s.to_string()).collect(),
            skip_dirs:  DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            atomic:     true,
        }
    }
}

impl RepackOptions {
    pub fn new() -> Self { Self::default() }

    pub fn skip_name(mut self, name: impl Into<String>) -> Self {
        self.skip_names.push(name.into());
        self
    }

    pub fn skip_dir(mut self, component: impl Into<String>) -> Self {
        self.skip_dirs.push(component.into());
        self
    }

    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}
