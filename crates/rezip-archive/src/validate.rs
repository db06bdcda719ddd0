use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rezip_fs::{AtomicWriteOptions, atomic_write_with};
use rezip_verify::sha256_reader;
use tracing::{info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ValidationError;
use crate::registry::OutputRegistry;
use crate::report::{ValidationOutcome, ValidationResult, report_path_for};

/// Re-hash every member named in `expected` and write the JSON report next to the archive.
///
/// Mismatches are reported, not raised. Errors mean no report was produced.
pub fn validate(
    archive_path: impl AsRef<Path>,
    expected: &OutputRegistry,
) -> Result<ValidationOutcome, ValidationError> {
    let archive_path = archive_path.as_ref();
    let open_error = |source: ZipError| ValidationError::Open {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| open_error(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(open_error)?;
    let members: HashSet<String> = archive.file_names().map(str::to_owned).collect();

    let mut results = Vec::with_capacity(expected.len());
    for (name, record) in expected {
        if !members.contains(name) {
            return Err(ValidationError::MissingEntry { name: name.clone() });
        }

        let hash_error = |source: std::io::Error| ValidationError::Hash {
            name: name.clone(),
            source,
        };
        let member = archive
            .by_name(name)
            .map_err(|e| hash_error(std::io::Error::other(e)))?;
        let actual = sha256_reader(member).map_err(hash_error)?;

        let matches = actual == record.hash;
        if !matches {
            warn!(name = %name, expected = %record.hash, actual = %actual, "hash mismatch");
        }

        results.push(ValidationResult {
            file_name: name.clone(),
            original_path: record.original_path.clone(),
            expected_hash: record.hash.to_hex(),
            actual_hash: actual.to_hex(),
            matches,
        });
    }

    let report_path = report_path_for(archive_path);
    atomic_write_with(&report_path, AtomicWriteOptions::new(), |file| {
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, &results)?;
        out.flush()
    })
    .map_err(|source| ValidationError::ReportWrite {
        path: report_path.clone(),
        source,
    })?;

    let outcome = ValidationOutcome {
        results,
        report_path,
    };
    info!(
        checked = outcome.results.len(),
        mismatches = outcome.mismatches().count(),
        report = %outcome.report_path.display(),
        "validation complete"
    );
    Ok(outcome)
}
