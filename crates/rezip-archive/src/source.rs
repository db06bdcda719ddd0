use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

use rezip_verify::{ContentHash, sha256_reader};
use zip::ZipArchive;
use zip::result::{ZipError, ZipResult};

use crate::entry::SourceEntry;
use crate::error::{RepackError, Result};

/// Archive-specific entry source.
///
/// Listing is metadata only; content is opened on demand so that entries
/// resolved by size alone are never read.
pub trait EntrySource {
    fn entries(&mut self) -> Result<Vec<SourceEntry>>;

    fn open_entry(&mut self, entry: &SourceEntry) -> Result<Box<dyn Read + '_>>;

    fn hash_entry(&mut self, entry: &SourceEntry) -> Result<ContentHash> {
        let reader = self.open_entry(entry)?;
        sha256_reader(reader).map_err(|source| RepackError::Read {
            path: entry.path.clone(),
            source,
        })
    }
}

pub struct ZipSource<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl ZipSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source: ZipError| RepackError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| open_error(ZipError::Io(e)))?;
        Self::new(BufReader::new(file)).map_err(open_error)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> ZipResult<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn entries(&mut self) -> Result<Vec<SourceEntry>> {
        let names: Vec<String> = self.archive.file_names().map(str::to_owned).collect();
        let mut entries = Vec::with_capacity(names.len());

        for (index, name) in names.into_iter().enumerate() {
            // Headers only; the member is not decrypted or decompressed here.
            let file = self.archive.by_index_raw(index).map_err(|e| RepackError::Read {
                path:   name.clone(),
                source: io::Error::other(e),
            })?;

            let mut entry = SourceEntry::new(index, file.name(), file.size());
            if let Some(mode) = file.unix_mode() {
                entry = entry.with_mode(mode);
            }
            if file.is_dir() {
                entry = entry.directory();
            }
            entries.push(entry);
        }

        Ok(entries)
    }

    fn open_entry(&mut self, entry: &SourceEntry) -> Result<Box<dyn Read + '_>> {
        let file = self.archive.by_index(entry.index).map_err(|e| RepackError::Read {
            path:   entry.path.clone(),
            source: io::Error::other(e),
        })?;
        Ok(Box::new(file))
    }
}
