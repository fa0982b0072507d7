use crate::error::{Error, Result};
use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Reduce a token to its English Snowball stem. Input is NFKC-normalized
/// and lowercased first, so the same surface word always maps to the same
/// stem regardless of case or composed form.
pub fn stem(token: &str) -> Result<String> {
    let normalized = token.nfkc().collect::<String>().to_lowercase();
    if normalized.is_empty() {
        return Err(Error::Stem {
            token: token.to_owned(),
        });
    }
    Ok(STEMMER.stem(&normalized).into_owned())
}
