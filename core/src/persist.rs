use crate::error::{Error, Result};
use crate::store::{IndexEntry, IndexStore};
use crate::DocId;

const SEP: u8 = 0;
const UUID_LEN: usize = 16;

/// Sled-backed index store. Two trees hold the same rows under different
/// key orders so that both per-stem and per-document scans are prefix
/// lookups:
///
///   index_terms: `stem \0 uuid` -> bincode (count, positions)
///   index_docs:  `uuid \0 stem` -> bincode count
///
/// A (term, document) entry is one key in each tree, so replacing an entry
/// is a single insert per tree and a reader never sees count and positions
/// disagree for one key.
pub struct SledIndexStore {
    terms: sled::Tree,
    docs: sled::Tree,
}

impl SledIndexStore {
    pub fn open(db: &sled::Db) -> Result<Self> {
        Ok(Self {
            terms: db.open_tree("index_terms")?,
            docs: db.open_tree("index_docs")?,
        })
    }

    fn term_key(stem: &str, id: DocId) -> Vec<u8> {
        let mut key = Vec::with_capacity(stem.len() + 1 + UUID_LEN);
        key.extend_from_slice(stem.as_bytes());
        key.push(SEP);
        key.extend_from_slice(id.as_bytes());
        key
    }

    fn doc_key(id: DocId, stem: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(UUID_LEN + 1 + stem.len());
        key.extend_from_slice(id.as_bytes());
        key.push(SEP);
        key.extend_from_slice(stem.as_bytes());
        key
    }

    fn doc_prefix(id: DocId) -> Vec<u8> {
        let mut key = Vec::with_capacity(UUID_LEN + 1);
        key.extend_from_slice(id.as_bytes());
        key.push(SEP);
        key
    }

    /// Recover (stem, document id) from an index_terms key. Stems are
    /// alphanumeric so the separator byte cannot occur inside one.
    fn parse_term_key(key: &[u8]) -> Result<(String, DocId)> {
        if key.len() < UUID_LEN + 2 {
            return Err(Error::MalformedId(format!("{key:?}")));
        }
        let split = key.len() - UUID_LEN - 1;
        let stem = std::str::from_utf8(&key[..split])
            .map_err(|_| Error::MalformedId(format!("{key:?}")))?
            .to_owned();
        let id = DocId::from_slice(&key[split + 1..])
            .map_err(|_| Error::MalformedId(format!("{key:?}")))?;
        Ok((stem, id))
    }
}

impl IndexStore for SledIndexStore {
    fn entries_by_stem(&self, stem: &str) -> Result<Vec<IndexEntry>> {
        let mut prefix = stem.as_bytes().to_vec();
        prefix.push(SEP);

        let mut entries = Vec::new();
        for row in self.terms.scan_prefix(&prefix) {
            let (key, value) = row?;
            let (term, id) = Self::parse_term_key(&key)?;
            let (count, positions): (u32, Vec<u32>) = bincode::deserialize(&value)?;
            entries.push(IndexEntry {
                term,
                document_id: id,
                count,
                positions,
            });
        }
        Ok(entries)
    }

    fn entry(&self, stem: &str, id: DocId) -> Result<Option<IndexEntry>> {
        match self.terms.get(Self::term_key(stem, id))? {
            Some(value) => {
                let (count, positions): (u32, Vec<u32>) = bincode::deserialize(&value)?;
                Ok(Some(IndexEntry {
                    term: stem.to_owned(),
                    document_id: id,
                    count,
                    positions,
                }))
            }
            None => Ok(None),
        }
    }

    fn upsert(&self, entry: IndexEntry) -> Result<()> {
        let value = bincode::serialize(&(entry.count, &entry.positions))?;
        self.terms
            .insert(Self::term_key(&entry.term, entry.document_id), value)?;
        let count = bincode::serialize(&entry.count)?;
        self.docs
            .insert(Self::doc_key(entry.document_id, &entry.term), count)?;
        Ok(())
    }

    fn delete_all_for_document(&self, id: DocId) -> Result<()> {
        let prefix = Self::doc_prefix(id);
        let mut stems = Vec::new();
        for row in self.docs.scan_prefix(&prefix) {
            let (key, _) = row?;
            let stem = std::str::from_utf8(&key[UUID_LEN + 1..])
                .map_err(|_| Error::MalformedId(format!("{key:?}")))?
                .to_owned();
            stems.push(stem);
        }
        for stem in stems {
            self.terms.remove(Self::term_key(&stem, id))?;
            self.docs.remove(Self::doc_key(id, &stem))?;
        }
        Ok(())
    }

    fn total_occurrences(&self, id: DocId) -> Result<u64> {
        let mut total = 0u64;
        for row in self.docs.scan_prefix(Self::doc_prefix(id)) {
            let (_, value) = row?;
            let count: u32 = bincode::deserialize(&value)?;
            total += u64::from(count);
        }
        Ok(total)
    }
}
