use crate::error::{Error, Result};
use crate::query::{QueryResult, TermMatch};
use crate::store::IndexStore;
use crate::DocId;
use std::collections::HashSet;

/// Relevance score for one matched document. Not persisted.
#[derive(Debug, Clone)]
pub struct Score {
    pub document_id: DocId,
    pub value: f64,
    pub matches: Vec<TermMatch>,
}

/// Two-factor heuristic: the mean of term coverage (distinct query terms
/// matched / distinct query terms supplied) and term prominence (distinct
/// query terms / total indexed occurrences in the document). A document
/// with no indexed occurrences gets zero prominence.
pub fn score_counts(
    store: &impl IndexStore,
    id: DocId,
    query_terms: &[String],
    matches: &[TermMatch],
) -> Result<f64> {
    if query_terms.is_empty() {
        return Err(Error::EmptyQuery);
    }
    let distinct: HashSet<&str> = query_terms.iter().map(String::as_str).collect();
    let matched: HashSet<&str> = matches.iter().map(|m| m.query_term.as_str()).collect();

    let coverage = matched.len() as f64 / distinct.len() as f64;
    let total = store.total_occurrences(id)?;
    let prominence = if total == 0 {
        0.0
    } else {
        distinct.len() as f64 / total as f64
    };
    Ok((coverage + prominence) / 2.0)
}

/// Score every document in a query result, highest first. Ties are broken
/// by document id so output order is stable across runs.
pub fn rank(
    store: &impl IndexStore,
    query_terms: &[String],
    results: QueryResult,
) -> Result<Vec<Score>> {
    let mut scores = Vec::with_capacity(results.len());
    for (id, matches) in results {
        let value = score_counts(store, id, query_terms, &matches)?;
        scores.push(Score {
            document_id: id,
            value,
            matches,
        });
    }
    scores.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    Ok(scores)
}
