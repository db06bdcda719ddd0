use crate::entry::SourceEntry;
use crate::options::RepackOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    Symlink,
    Metadata,
}

/// Decides which archive members are repacked.
///
/// Works on metadata only and never reads entry content.
#[derive(Clone, Debug)]
pub struct Classifier {
    skip_names: Vec<String>,
    skip_dirs:  Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self { Self::new(&RepackOptions::default()) }
}

impl Classifier {
    pub fn new(options: &RepackOptions) -> Self {
        Self {
            skip_names: options.skip_names.clone(),
            skip_dirs:  options.skip_dirs.clone(),
        }
    }

    pub fn should_skip(&self, entry: &SourceEntry) -> bool { self.skip_reason(entry).is_some() }

    pub fn skip_reason(&self, entry: &SourceEntry) -> Option<SkipReason> {
        if entry.is_dir() {
            Some(SkipReason::Directory)
        } else if entry.is_symlink() {
            Some(SkipReason::Symlink)
        } else if self.is_metadata(entry) {
            Some(SkipReason::Metadata)
        } else {
            None
        }
    }

    fn is_metadata(&self, entry: &SourceEntry) -> bool {
        let name = entry.flattened_name();
        self.skip_names.iter().any(|n| n == name)
            || entry
                .components()
                .any(|component| self.skip_dirs.iter().any(|d| d == component))
    }
}
