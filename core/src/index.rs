use crate::error::Result;
use crate::store::{IndexEntry, IndexStore};
use crate::{stem, tokenizer, DocId};
use std::collections::HashMap;

/// Index one document's text: tokenize, stem, group 0-based word positions
/// by stem, and replace the document's rows in the store.
///
/// All tokens are stemmed before anything is written, so a stem failure
/// aborts with no partial persistence. Prior rows are deleted first, which
/// makes re-indexing a true replace: terms no longer present in the text
/// lose their entries. Re-running on unchanged text reproduces the same
/// rows.
pub fn index_document(store: &impl IndexStore, id: DocId, text: &str) -> Result<()> {
    let words: Vec<&str> = tokenizer::tokenize(text).collect();
    let mut stems = Vec::with_capacity(words.len());
    for word in &words {
        stems.push(stem::stem(word)?);
    }
    debug_assert_eq!(words.len(), stems.len());

    let mut positions: HashMap<&str, Vec<u32>> = HashMap::new();
    for (pos, s) in stems.iter().enumerate() {
        positions.entry(s.as_str()).or_default().push(pos as u32);
    }

    store.delete_all_for_document(id)?;
    let distinct = positions.len();
    for (term, positions) in positions {
        store.upsert(IndexEntry::new(term.to_owned(), id, positions))?;
    }
    tracing::debug!(%id, words = words.len(), terms = distinct, "indexed document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryIndexStore;

    #[test]
    fn positions_strictly_increase() {
        let store = MemoryIndexStore::new();
        let id = DocId::new_v4();
        index_document(&store, id, "the bird saw the other bird").unwrap();
        let e = store.entry("bird", id).unwrap().unwrap();
        assert_eq!(e.positions, vec![1, 5]);
        assert!(e.is_consistent());
    }

    #[test]
    fn inflections_share_one_entry() {
        let store = MemoryIndexStore::new();
        let id = DocId::new_v4();
        index_document(&store, id, "running runs run").unwrap();
        let e = store.entry("run", id).unwrap().unwrap();
        assert_eq!(e.count, 3);
        assert_eq!(e.positions, vec![0, 1, 2]);
    }
}
