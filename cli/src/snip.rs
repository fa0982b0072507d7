use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use snip_core::{tokenizer, DocId};

/// One stored snippet of text with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnipRecord {
    pub id: DocId,
    pub name: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    pub text: String,
}

impl SnipRecord {
    pub fn new(name: String, text: String) -> Self {
        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self {
            id: DocId::new_v4(),
            name,
            timestamp,
            text,
        }
    }

    pub fn count_words(&self) -> usize {
        tokenizer::count_words(&self.text)
    }

    /// First 8 hex chars of the id, for listing output.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_owned()
    }
}

lazy_static! {
    static ref WHITESPACE: regex::Regex = regex::Regex::new(r"\s+").expect("valid regex");
}

/// Squeeze all whitespace runs to single spaces.
pub fn flatten(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Derive a display name from the first `word_count` words of the text.
pub fn generate_name(text: &str, word_count: usize) -> String {
    tokenizer::tokenize(&flatten(text))
        .take(word_count)
        .collect::<Vec<&str>>()
        .join(" ")
}
