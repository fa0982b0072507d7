use crate::error::{Error, Result};
use crate::store::IndexStore;
use crate::{stem, DocId};
use std::collections::{HashMap, HashSet};

/// Match statistics for one query term within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    /// The raw term as the caller supplied it.
    pub query_term: String,
    /// The stem it was resolved to in the index.
    pub stem: String,
    pub count: u32,
}

/// Per-document match lists for the terms that were searched for.
pub type QueryResult = HashMap<DocId, Vec<TermMatch>>;

/// Resolve raw query terms against the index. Each raw term is stemmed and
/// tracked under its own label, so two raw terms that stem identically both
/// appear in the match lists. With `require_all`, documents not covering
/// every distinct raw term are dropped entirely.
///
/// An empty result map means no matches, which is not an error.
pub fn search_terms(
    store: &impl IndexStore,
    terms: &[String],
    require_all: bool,
) -> Result<QueryResult> {
    if terms.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let mut results: QueryResult = HashMap::new();
    for raw in terms {
        let stemmed = stem::stem(raw)?;
        tracing::debug!(term = %raw, stem = %stemmed, "resolving query term");
        for entry in store.entries_by_stem(&stemmed)? {
            results.entry(entry.document_id).or_default().push(TermMatch {
                query_term: raw.clone(),
                stem: stemmed.clone(),
                count: entry.count,
            });
        }
    }

    if require_all {
        let wanted: HashSet<&str> = terms.iter().map(String::as_str).collect();
        results.retain(|_, matches| {
            let seen: HashSet<&str> = matches.iter().map(|m| m.query_term.as_str()).collect();
            wanted.iter().all(|t| seen.contains(t))
        });
    }

    Ok(results)
}
