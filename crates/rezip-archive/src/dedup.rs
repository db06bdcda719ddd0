//! Flattening and name-collision resolution.
//!
//! Entries are visited once in archive order. For a repeated flattened name
//! the larger entry wins; equal sizes must carry identical content or the
//! archive cannot be repacked.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry as Slot;

use rezip_verify::ContentHash;
use tracing::{debug, info};

use crate::classify::Classifier;
use crate::entry::SourceEntry;
use crate::error::{RepackError, Result};
use crate::source::EntrySource;

/// The surviving entry for one flattened name.
///
/// The content hash is filled in only when a size tie forces a comparison.
#[derive(Clone, Debug)]
pub struct Candidate {
    entry: SourceEntry,
    hash:  Option<ContentHash>,
}

impl Candidate {
    fn new(entry: SourceEntry) -> Self { Self { entry, hash: None } }

    pub fn entry(&self) -> &SourceEntry { &self.entry }

    /// Hash computed during resolution, if any.
    pub fn hash(&self) -> Option<&ContentHash> { self.hash.as_ref() }

    fn hash_with<S: EntrySource>(&mut self, source: &mut S) -> Result<ContentHash> {
        if let Some(hash) = self.hash {
            return Ok(hash);
        }
        let hash = source.hash_entry(&self.entry)?;
        self.hash = Some(hash);
        Ok(hash)
    }
}

/// Flattened name → surviving entry, ordered by name.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
    candidates: BTreeMap<String, Candidate>,
}

impl CandidateSet {
    pub fn len(&self) -> usize { self.candidates.len() }

    pub fn is_empty(&self) -> bool { self.candidates.is_empty() }

    pub fn get(&self, name: &str) -> Option<&SourceEntry> {
        self.candidates.get(name).map(Candidate::entry)
    }

    pub fn contains(&self, name: &str) -> bool { self.candidates.contains_key(name) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Candidate)> {
        self.candidates.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.candidates.keys().map(String::as_str) }
}

/// Resolve every kept entry of `source` to one survivor per flattened name.
pub fn resolve<S: EntrySource>(source: &mut S, classifier: &Classifier) -> Result<CandidateSet> {
    let entries = source.entries()?;
    let total = entries.len();
    let mut set = CandidateSet::default();
    let mut skipped = 0usize;
    let mut hashed = 0usize;

    for entry in entries {
        if let Some(reason) = classifier.skip_reason(&entry) {
            debug!(path = %entry.path, ?reason, "skipping entry");
            skipped += 1;
            continue;
        }

        let name = entry.flattened_name().to_owned();
        let existing = match set.candidates.entry(name.clone()) {
            Slot::Vacant(slot) => {
                slot.insert(Candidate::new(entry));
                continue;
            }
            Slot::Occupied(slot) => slot.into_mut(),
        };

        match entry.size.cmp(&existing.entry.size) {
            Ordering::Greater => {
                debug!(
                    name = %name,
                    kept = %entry.path,
                    dropped = %existing.entry.path,
                    "larger entry replaces incumbent"
                );
                *existing = Candidate::new(entry);
            }
            Ordering::Less => {
                debug!(
                    name = %name,
                    kept = %existing.entry.path,
                    dropped = %entry.path,
                    "smaller entry dropped"
                );
            }
            Ordering::Equal => {
                let incumbent = existing.hash_with(source)?;
                let challenger = source.hash_entry(&entry)?;
                hashed += 1;

                if incumbent != challenger {
                    return Err(RepackError::Conflict {
                        name,
                        first: existing.entry.path.clone(),
                        second: entry.path,
                    });
                }
                debug!(
                    name = %name,
                    kept = %existing.entry.path,
                    dropped = %entry.path,
                    "identical duplicate merged"
                );
            }
        }
    }

    info!(
        total,
        skipped,
        hashed,
        kept = set.len(),
        "resolved archive entries"
    );
    Ok(set)
}
