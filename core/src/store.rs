use crate::error::Result;
use crate::DocId;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the inverted index: how often a stem occurs in a document
/// and at which 0-based word positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub term: String,
    pub document_id: DocId,
    pub count: u32,
    pub positions: Vec<u32>,
}

impl IndexEntry {
    /// Build an entry from its positions; `count` is derived so the two
    /// can never disagree.
    pub fn new(term: String, document_id: DocId, positions: Vec<u32>) -> Self {
        Self {
            term,
            document_id,
            count: positions.len() as u32,
            positions,
        }
    }

    /// True when count matches positions and positions are strictly
    /// increasing.
    pub fn is_consistent(&self) -> bool {
        self.count as usize == self.positions.len()
            && self.positions.windows(2).all(|w| w[0] < w[1])
    }
}

/// Source of document text, owned by the caller. The core never writes
/// documents, it only reads their current text.
pub trait DocumentStore {
    fn text(&self, id: DocId) -> Result<String>;
}

/// Persistence contract for the inverted index. At most one entry exists
/// per (term, document) pair; `upsert` replaces the whole entry atomically
/// from a reader's point of view.
pub trait IndexStore {
    fn entries_by_stem(&self, stem: &str) -> Result<Vec<IndexEntry>>;
    fn entry(&self, stem: &str, id: DocId) -> Result<Option<IndexEntry>>;
    fn upsert(&self, entry: IndexEntry) -> Result<()>;
    fn delete_all_for_document(&self, id: DocId) -> Result<()>;
    /// Sum of `count` over every entry for the document.
    fn total_occurrences(&self, id: DocId) -> Result<u64>;
}

/// In-memory index store for tests and ephemeral corpora.
#[derive(Default)]
pub struct MemoryIndexStore {
    entries: RwLock<BTreeMap<(String, DocId), IndexEntry>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl IndexStore for MemoryIndexStore {
    fn entries_by_stem(&self, stem: &str) -> Result<Vec<IndexEntry>> {
        let range = (stem.to_owned(), DocId::nil())..=(stem.to_owned(), DocId::max());
        Ok(self
            .entries
            .read()
            .range(range)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn entry(&self, stem: &str, id: DocId) -> Result<Option<IndexEntry>> {
        Ok(self.entries.read().get(&(stem.to_owned(), id)).cloned())
    }

    fn upsert(&self, entry: IndexEntry) -> Result<()> {
        let key = (entry.term.clone(), entry.document_id);
        self.entries.write().insert(key, entry);
        Ok(())
    }

    fn delete_all_for_document(&self, id: DocId) -> Result<()> {
        self.entries.write().retain(|(_, doc), _| *doc != id);
        Ok(())
    }

    fn total_occurrences(&self, id: DocId) -> Result<u64> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|e| e.document_id == id)
            .map(|e| u64::from(e.count))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_count_follows_positions() {
        let id = DocId::new_v4();
        let e = IndexEntry::new("bird".into(), id, vec![0, 4, 9]);
        assert_eq!(e.count, 3);
        assert!(e.is_consistent());
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let store = MemoryIndexStore::new();
        let id = DocId::new_v4();
        store
            .upsert(IndexEntry::new("bird".into(), id, vec![0]))
            .unwrap();
        store
            .upsert(IndexEntry::new("bird".into(), id, vec![2, 5]))
            .unwrap();
        let e = store.entry("bird", id).unwrap().unwrap();
        assert_eq!(e.count, 2);
        assert_eq!(e.positions, vec![2, 5]);
        assert_eq!(store.len(), 1);
    }
}
