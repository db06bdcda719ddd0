use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const REPORT_SUFFIX: &str = "_validation.json";

/// Outcome of re-hashing one output member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub file_name:     String,
    pub original_path: String,
    #[serde(rename = "original_sha")]
    pub expected_hash: String,
    #[serde(rename = "new_sha")]
    pub actual_hash:   String,
    #[serde(rename = "match")]
    pub matches:       bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Ordered by file name.
    pub results:     Vec<ValidationResult>,
    pub report_path: PathBuf,
}

impl ValidationOutcome {
    /// True when every member matched; vacuously true for an empty archive.
    pub fn all_match(&self) -> bool { self.results.iter().all(|r| r.matches) }

    pub fn mismatches(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.matches)
    }
}

/// `dir/out.zip` → `dir/out_validation.json`.
///
/// Only the text after the last dot is dropped, so `.zip` becomes
/// `_validation.json`.
pub fn report_path_for(archive: &Path) -> PathBuf {
    let name = archive
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name.as_str(),
    };
    archive.with_file_name(format!("{stem}{REPORT_SUFFIX}"))
}
