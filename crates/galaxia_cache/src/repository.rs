//! # Creation Repository
//!
//! Persistence seam for finished creations, addressed by configuration
//! hash. The render core only needs four operations; storage engines
//! live outside this workspace. [`InMemoryRepository`] backs tests and
//! the command-line tool.

use std::collections::HashMap;

use parking_lot::RwLock;

use galaxia_shared::{CosmeticParameters, StructuralParameters};

use crate::error::{CacheError, CacheResult};
use crate::hashing::{config_hash, structural_hash, ConfigHash, StructuralHash};

/// A stored creation.
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyRecord {
    /// Assigned by the repository on save; 0 before that.
    pub id: u64,
    /// Display name. Not part of any hash.
    pub name: String,
    /// Best note given to this configuration. Not part of any hash.
    pub note: f64,
    /// Key of the cached intensity field.
    pub structural_hash: StructuralHash,
    /// Identity of the full configuration.
    pub config_hash: ConfigHash,
    /// Structural half.
    pub structural: StructuralParameters,
    /// Cosmetic half.
    pub cosmetic: CosmeticParameters,
}

impl GalaxyRecord {
    /// Builds an unsaved record, computing both hashes.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        note: f64,
        structural: StructuralParameters,
        cosmetic: CosmeticParameters,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            note,
            structural_hash: structural_hash(&structural),
            config_hash: config_hash(&structural, &cosmetic),
            structural,
            cosmetic,
        }
    }
}

/// Storage for creations.
pub trait GalaxyRepository: Send + Sync {
    /// Looks up a record by configuration hash.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn find_by_hash(&self, hash: ConfigHash) -> CacheResult<Option<GalaxyRecord>>;

    /// Stores a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::DuplicateConfig`] if the hash is taken.
    fn save(&self, record: GalaxyRecord) -> CacheResult<GalaxyRecord>;

    /// Raises a record's note to `max(current, note)`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::RecordNotFound`] for an unknown id.
    fn update_max_note(&self, id: u64, note: f64) -> CacheResult<GalaxyRecord>;

    /// Deletes a record. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Implementation-defined storage failures.
    fn delete_by_id(&self, id: u64) -> CacheResult<bool>;
}

#[derive(Default)]
struct Records {
    next_id: u64,
    by_id: HashMap<u64, GalaxyRecord>,
    by_hash: HashMap<ConfigHash, u64>,
}

/// Process-local repository.
#[derive(Default)]
pub struct InMemoryRepository {
    records: RwLock<Records>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().by_id.len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GalaxyRepository for InMemoryRepository {
    fn find_by_hash(&self, hash: ConfigHash) -> CacheResult<Option<GalaxyRecord>> {
        let records = self.records.read();
        Ok(records
            .by_hash
            .get(&hash)
            .and_then(|id| records.by_id.get(id))
            .cloned())
    }

    fn save(&self, mut record: GalaxyRecord) -> CacheResult<GalaxyRecord> {
        let mut records = self.records.write();
        if records.by_hash.contains_key(&record.config_hash) {
            return Err(CacheError::DuplicateConfig(record.config_hash));
        }
        records.next_id += 1;
        record.id = records.next_id;
        records.by_hash.insert(record.config_hash, record.id);
        records.by_id.insert(record.id, record.clone());
        tracing::debug!(id = record.id, hash = %record.config_hash, "saved galaxy record");
        Ok(record)
    }

    fn update_max_note(&self, id: u64, note: f64) -> CacheResult<GalaxyRecord> {
        if !note.is_finite() {
            return Err(CacheError::InvalidNote(note.to_string()));
        }
        let mut records = self.records.write();
        let record = records
            .by_id
            .get_mut(&id)
            .ok_or(CacheError::RecordNotFound(id))?;
        record.note = record.note.max(note);
        Ok(record.clone())
    }

    fn delete_by_id(&self, id: u64) -> CacheResult<bool> {
        let mut records = self.records.write();
        match records.by_id.remove(&id) {
            Some(record) => {
                records.by_hash.remove(&record.config_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: u64, note: f64) -> GalaxyRecord {
        GalaxyRecord::new(
            "andromeda",
            note,
            StructuralParameters::classic_spiral().with_seed(seed),
            CosmeticParameters::default(),
        )
    }

    #[test]
    fn test_save_assigns_ids_and_indexes_hash() {
        let repo = InMemoryRepository::new();
        let a = repo.save(record(1, 3.0)).unwrap();
        let b = repo.save(record(2, 4.0)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(repo.find_by_hash(a.config_hash).unwrap(), Some(a));
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_duplicate_config_rejected() {
        let repo = InMemoryRepository::new();
        repo.save(record(1, 3.0)).unwrap();
        let err = repo.save(record(1, 5.0)).unwrap_err();
        assert!(matches!(err, CacheError::DuplicateConfig(_)));
    }

    #[test]
    fn test_update_keeps_maximum() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(record(1, 3.0)).unwrap();
        assert_eq!(repo.update_max_note(saved.id, 2.0).unwrap().note, 3.0);
        assert_eq!(repo.update_max_note(saved.id, 4.5).unwrap().note, 4.5);
        assert!(repo.update_max_note(99, 1.0).is_err());
        assert!(repo.update_max_note(saved.id, f64::NAN).is_err());
    }

    #[test]
    fn test_delete_frees_hash() {
        let repo = InMemoryRepository::new();
        let saved = repo.save(record(1, 3.0)).unwrap();
        assert!(repo.delete_by_id(saved.id).unwrap());
        assert!(!repo.delete_by_id(saved.id).unwrap());
        assert_eq!(repo.find_by_hash(saved.config_hash).unwrap(), None);
        assert!(repo.save(record(1, 1.0)).is_ok());
    }
}
