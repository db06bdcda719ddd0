//! Flatten, deduplicate and repack ZIP archives, then validate the result.
//!
//! # Architecture
//!
//! - `entry.rs` - Source entry metadata and flattened names
//! - `classify.rs` - Directory, symlink and OS-metadata filtering
//! - `source.rs` - Entry listing and on-demand content access
//! - `dedup.rs` - Name-collision resolution
//! - `write.rs` - Uncompressed output with hash-while-copy
//! - `validate.rs` - Re-hashing and the JSON validation report
//! - `registry.rs` / `report.rs` - Shared result types

use std::path::Path;

pub use classify::{Classifier, SkipReason};
pub use dedup::{Candidate, CandidateSet, resolve};
pub use entry::SourceEntry;
pub use error::{RegistryError, RepackError, Result, ValidationError};
pub use options::{DEFAULT_SKIP_DIRS, DEFAULT_SKIP_NAMES, RepackOptions};
pub use registry::{FileRecord, OutputRegistry};
pub use report::{ValidationOutcome, ValidationResult, report_path_for};
pub use source::{EntrySource, ZipSource};
pub use validate::validate;
pub use write::write;

mod classify;
mod dedup;
mod entry;
mod error;
mod options;
mod registry;
mod report;
mod source;
mod validate;
mod write;

#[cfg(test)]
mod testing;

/// Repack `input` into a flat, deduplicated, uncompressed archive at `output`.
pub fn repackage(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<OutputRegistry> {
    repackage_with(input, output, &RepackOptions::default())
}

pub fn repackage_with(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RepackOptions,
) -> Result<OutputRegistry> {
    let input = input.as_ref();
    let output = output.as_ref();

    tracing::info!(input = %input.display(), output = %output.display(), "repackaging");

    let mut source = ZipSource::open(input)?;
    let candidates = resolve(&mut source, &Classifier::new(options))?;
    write(&mut source, &candidates, output, options)
}
