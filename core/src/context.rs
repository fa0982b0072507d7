use crate::error::Result;
use crate::store::{DocumentStore, IndexStore};
use crate::{stem, tokenizer, DocId};

/// Words surrounding one occurrence of a matched term, for display.
/// `before_start` and `after_end` are 1-based word positions of the
/// window's bounds within the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub before: Vec<String>,
    /// The term as it literally tokenizes in the document.
    pub term: String,
    pub after: Vec<String>,
    pub before_start: usize,
    pub after_end: usize,
}

/// Gather a window of `window` words on each side of every indexed
/// occurrence of `term` in the document. The text is re-tokenized against
/// its current content rather than trusting any cached word list; a stored
/// position that falls outside the fresh tokenization (the document was
/// edited and not re-indexed) is logged and skipped.
pub fn gather_context(
    index: &impl IndexStore,
    docs: &impl DocumentStore,
    id: DocId,
    term: &str,
    window: usize,
) -> Result<Vec<ContextWindow>> {
    let stemmed = stem::stem(term)?;
    let entry = match index.entry(&stemmed, id)? {
        Some(entry) => entry,
        None => return Ok(Vec::new()),
    };

    let text = docs.text(id)?;
    let words: Vec<&str> = tokenizer::tokenize(&text).collect();

    let mut windows = Vec::with_capacity(entry.positions.len());
    for &stored in &entry.positions {
        let pos = stored as usize;
        if pos >= words.len() {
            tracing::warn!(
                %id,
                stem = %stemmed,
                position = pos,
                words = words.len(),
                "stored position outside current text, skipping window"
            );
            continue;
        }
        let start = pos.saturating_sub(window);
        let end = (pos + window + 1).min(words.len());
        windows.push(ContextWindow {
            before: words[start..pos].iter().map(|w| w.to_string()).collect(),
            term: words[pos].to_string(),
            after: words[pos + 1..end].iter().map(|w| w.to_string()).collect(),
            before_start: start + 1,
            after_end: (pos + window).min(words.len() - 1) + 1,
        });
    }
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::index::index_document;
    use crate::store::MemoryIndexStore;
    use parking_lot::RwLock;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryDocs {
        texts: RwLock<HashMap<DocId, String>>,
    }

    impl MemoryDocs {
        fn put(&self, id: DocId, text: &str) {
            self.texts.write().insert(id, text.to_owned());
        }
    }

    impl DocumentStore for MemoryDocs {
        fn text(&self, id: DocId) -> Result<String> {
            self.texts
                .read()
                .get(&id)
                .cloned()
                .ok_or(Error::UnknownDocument(id))
        }
    }

    #[test]
    fn window_around_single_occurrence() {
        let store = MemoryIndexStore::new();
        let docs = MemoryDocs::default();
        let id = DocId::new_v4();
        // "aquarium" sits at 0-based word position 4
        let text = "my long day at aquarium was quite something else";
        docs.put(id, text);
        index_document(&store, id, text).unwrap();

        let windows = gather_context(&store, &docs, id, "aquarium", 2).unwrap();
        assert_eq!(windows.len(), 1);
        let w = &windows[0];
        assert_eq!(w.before, vec!["day", "at"]);
        assert_eq!(w.term, "aquarium");
        assert_eq!(w.after, vec!["was", "quite"]);
        assert_eq!(w.before_start, 3);
        assert_eq!(w.after_end, 7);
    }

    #[test]
    fn window_clamps_at_document_edges() {
        let store = MemoryIndexStore::new();
        let docs = MemoryDocs::default();
        let id = DocId::new_v4();
        let text = "aquarium visit today";
        docs.put(id, text);
        index_document(&store, id, text).unwrap();

        let windows = gather_context(&store, &docs, id, "aquarium", 4).unwrap();
        assert_eq!(windows.len(), 1);
        let w = &windows[0];
        assert!(w.before.is_empty());
        assert_eq!(w.after, vec!["visit", "today"]);
        assert_eq!(w.before_start, 1);
        assert_eq!(w.after_end, 3);
    }

    #[test]
    fn unmatched_term_gives_no_windows() {
        let store = MemoryIndexStore::new();
        let docs = MemoryDocs::default();
        let id = DocId::new_v4();
        docs.put(id, "nothing to see");
        index_document(&store, id, "nothing to see").unwrap();
        let windows = gather_context(&store, &docs, id, "aquarium", 3).unwrap();
        assert!(windows.is_empty());
    }

    #[test]
    fn stale_positions_are_skipped() {
        let store = MemoryIndexStore::new();
        let docs = MemoryDocs::default();
        let id = DocId::new_v4();
        let original = "one two three four five aquarium";
        index_document(&store, id, original).unwrap();
        // text shrinks after indexing, stored position 5 is now stale
        docs.put(id, "short now");

        let windows = gather_context(&store, &docs, id, "aquarium", 2).unwrap();
        assert!(windows.is_empty());
    }
}
