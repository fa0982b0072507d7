use crate::DocId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Stemming rejects input that normalizes to nothing. Tokenizer output
    /// never hits this; raw query strings can.
    #[error("cannot stem malformed token {token:?}")]
    Stem { token: String },

    #[error("refusing to search for an empty term list")]
    EmptyQuery,

    #[error("no document with id {0}")]
    UnknownDocument(DocId),

    #[error("id prefix {0:?} matches more than one document")]
    AmbiguousId(String),

    #[error("malformed document id {0:?}")]
    MalformedId(String),

    #[error("index store failure")]
    Sled(#[from] sled::Error),

    #[error("index entry codec failure")]
    Codec(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
