use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::Path;

use rezip_fs::{AtomicWriteOptions, StagedFile};
use rezip_verify::{HashingReader, Sha256Hasher};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::dedup::CandidateSet;
use crate::error::{RepackError, Result};
use crate::options::RepackOptions;
use crate::registry::{FileRecord, OutputRegistry};
use crate::source::EntrySource;

/// Write every candidate into a new uncompressed archive at `destination`.
///
/// Members are stored under their flattened names in name order. With
/// `options.atomic` the archive is staged beside `destination` and only
/// renamed over it once complete; otherwise a failed write leaves a partial
/// file behind that the caller must discard.
pub fn write<S: EntrySource>(
    source: &mut S,
    candidates: &CandidateSet,
    destination: impl AsRef<Path>,
    options: &RepackOptions,
) -> Result<OutputRegistry> {
    let destination = destination.as_ref();

    let registry = if options.atomic {
        let mut staged = StagedFile::with_options(
            destination,
            AtomicWriteOptions::new().prefix(".rezip-").suffix(".zip.tmp"),
        )?;
        let registry = write_members(source, candidates, staged.file_mut(), destination)?;
        staged.commit()?;
        registry
    } else {
        let mut file = File::create(destination).map_err(|source| RepackError::Create {
            path: destination.to_path_buf(),
            source,
        })?;
        write_members(source, candidates, &mut file, destination)?
    };

    info!(
        destination = %destination.display(),
        entries = registry.len(),
        "wrote output archive"
    );
    Ok(registry)
}

fn write_members<S: EntrySource, W: Write + Seek>(
    source: &mut S,
    candidates: &CandidateSet,
    sink: W,
    destination: &Path,
) -> Result<OutputRegistry> {
    let mut zip = ZipWriter::new(sink);
    // Members carry the DOS epoch, never the wall clock.
    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());
    let mut registry = OutputRegistry::new();

    for (name, candidate) in candidates.iter() {
        let entry = candidate.entry();
        let entry_error = |source: io::Error| RepackError::Entry {
            name: name.to_string(),
            source,
        };

        let file_options = file_options.large_file(entry.size >= u32::MAX as u64);
        zip.start_file(name, file_options)
            .map_err(|e| entry_error(io::Error::other(e)))?;

        let reader = source.open_entry(entry)?;
        let mut hashing = HashingReader::new(reader, Sha256Hasher::new());
        io::copy(&mut hashing, &mut zip).map_err(entry_error)?;
        let hash = hashing.finish();

        debug!(name, original = %entry.path, %hash, "stored entry");
        registry.insert(
            name,
            FileRecord {
                original_path: entry.path.clone(),
                hash,
            },
        );
    }

    zip.finish().map_err(|source| RepackError::Finish {
        path: destination.to_path_buf(),
        source,
    })?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::dedup::resolve;
    use crate::source::ZipSource;
    use crate::testing::{Member, zip_bytes};
    use rezip_verify::Sha256Hasher;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn source_for(members: &[Member<'_>]) -> ZipSource<Cursor<Vec<u8>>> {
        ZipSource::new(Cursor::new(zip_bytes(members))).unwrap()
    }

    #[test]
    fn stores_members_uncompressed_by_flattened_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.zip");
        let mut source = source_for(&[
            Member::File("docs/file1.txt", b"content1"),
            Member::File("src/deep/file2.txt", b"content2"),
        ]);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();

        let registry = write(&mut source, &candidates, &out, &RepackOptions::default()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("file1.txt").unwrap().original_path, "docs/file1.txt");
        assert_eq!(
            registry.get("file2.txt").unwrap().hash,
            Sha256Hasher::digest(b"content2")
        );

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        for index in 0..archive.len() {
            let mut member = archive.by_index(index).unwrap();
            assert_eq!(member.compression(), CompressionMethod::Stored);
            let mut content = String::new();
            member.read_to_string(&mut content).unwrap();
            let expected = if member.name() == "file1.txt" { "content1" } else { "content2" };
            assert_eq!(content, expected);
        }
    }

    #[test]
    fn member_order_is_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.zip");
        let mut source = source_for(&[
            Member::File("z/zeta", b"1"),
            Member::File("a/alpha", b"2"),
            Member::File("m/mid", b"3"),
        ]);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();
        write(&mut source, &candidates, &out, &RepackOptions::default()).unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let names: Vec<_> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn output_bytes_do_not_depend_on_clock() {
        let dir = tempfile::tempdir().unwrap();
        let members = [Member::File("a/one.txt", b"1"), Member::File("b/two.txt", b"22")];
        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");

        let mut source = source_for(&members);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();
        write(&mut source, &candidates, &first, &RepackOptions::default()).unwrap();

        // DOS timestamps have two-second resolution.
        std::thread::sleep(std::time::Duration::from_millis(2100));

        let mut source = source_for(&members);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();
        write(&mut source, &candidates, &second, &RepackOptions::default()).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }

    #[test]
    fn empty_candidate_set_writes_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.zip");
        let mut source = source_for(&[]);

        let registry = write(
            &mut source,
            &CandidateSet::default(),
            &out,
            &RepackOptions::default(),
        )
        .unwrap();

        assert!(registry.is_empty());
        let archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn missing_parent_fails_in_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nonexistent").join("out.zip");
        let mut source = source_for(&[Member::File("a.txt", b"a")]);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();

        let atomic = write(&mut source, &candidates, &out, &RepackOptions::default());
        assert!(matches!(atomic, Err(RepackError::Staging(_))));

        let direct = write(
            &mut source,
            &candidates,
            &out,
            &RepackOptions::default().atomic(false),
        );
        assert!(matches!(direct, Err(RepackError::Create { .. })));
    }

    #[test]
    fn non_atomic_mode_writes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.zip");
        let mut source = source_for(&[Member::File("a/b.txt", b"bee")]);
        let candidates = resolve(&mut source, &Classifier::default()).unwrap();

        let registry = write(
            &mut source,
            &candidates,
            &out,
            &RepackOptions::default().atomic(false),
        )
        .unwrap();

        assert_eq!(registry.get("b.txt").unwrap().original_path, "a/b.txt");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
