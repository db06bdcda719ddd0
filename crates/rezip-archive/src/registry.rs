use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io::{BufWriter, Write};
use std::path::Path;

use rezip_fs::{AtomicWriteOptions, atomic_read, atomic_write_with};
use rezip_verify::ContentHash;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Where an output member came from and what it hashed to when written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Full path of the entry in the source archive before flattening.
    pub original_path: String,
    pub hash:          ContentHash,
}

/// Flattened name → [`FileRecord`] for every member of a repacked archive.
///
/// Iteration is lexicographic by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputRegistry {
    records: BTreeMap<String, FileRecord>,
}

impl OutputRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, record: FileRecord) -> Option<FileRecord> {
        self.records.insert(name.into(), record)
    }

    pub fn get(&self, name: &str) -> Option<&FileRecord> { self.records.get(name) }

    pub fn contains(&self, name: &str) -> bool { self.records.contains_key(name) }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FileRecord> { self.records.iter() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.records.keys().map(String::as_str) }

    /// Persist as pretty JSON, replacing `path` atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        atomic_write_with(path, AtomicWriteOptions::new(), |file| {
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, self)?;
            out.flush()
        })?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let bytes = atomic_read(path)?;
        serde_json::from_slice(&bytes).map_err(|source| RegistryError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<'a> IntoIterator for &'a OutputRegistry {
    type Item = (&'a String, &'a FileRecord);
    type IntoIter = btree_map::Iter<'a, String, FileRecord>;

    fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}

impl FromIterator<(String, FileRecord)> for OutputRegistry {
    fn from_iter<I: IntoIterator<Item = (String, FileRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rezip_verify::Sha256Hasher;

    fn record(path: &str, content: &[u8]) -> FileRecord {
        FileRecord {
            original_path: path.to_string(),
            hash:          Sha256Hasher::digest(content),
        }
    }

    #[test]
    fn iterates_by_name() {
        let registry: OutputRegistry = [
            ("zeta.txt".to_string(), record("z/zeta.txt", b"z")),
            ("alpha.txt".to_string(), record("a/alpha.txt", b"a")),
            ("Mid.txt".to_string(), record("m/Mid.txt", b"m")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Mid.txt", "alpha.txt", "zeta.txt"]
        );
    }

    #[test]
    fn json_shape() {
        let mut registry = OutputRegistry::new();
        registry.insert("file1.txt", record("foo/bar/file1.txt", b"content1"));

        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(value["file1.txt"]["original_path"], "foo/bar/file1.txt");
        assert_eq!(
            value["file1.txt"]["hash"],
            Sha256Hasher::digest(b"content1").to_hex()
        );
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");

        let mut registry = OutputRegistry::new();
        registry.insert("a.txt", record("x/a.txt", b"a"));
        registry.insert("b.txt", record("y/b.txt", b"b"));
        registry.save(&path).unwrap();

        assert_eq!(OutputRegistry::load(&path).unwrap(), registry);
    }

    #[test]
    fn load_rejects_bad_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(
            &path,
            r#"{"a.txt": {"original_path": "a.txt", "hash": "not-hex"}}"#,
        )
        .unwrap();

        assert!(matches!(
            OutputRegistry::load(&path),
            Err(RegistryError::Decode { .. })
        ));
    }
}
