use std::path::PathBuf;

use thiserror::Error;

pub use index::{IndexSource, RecipeIndex};
pub use recipe::{Recipe, RecipeId};

/// The ordered recipe index and the places it can be loaded from.
pub mod index;

/// Data structures for single recipe records.
pub mod recipe;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The request could not be sent or its body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Wraps the kind of json value found where an array was expected.
    #[error("expected a json array of recipes, found {0}")]
    Shape(&'static str),

    /// Wraps a location that resolves to nothing fetchable.
    #[error("invalid index location `{0}`")]
    Location(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// A single record in the index that cannot be used.
///
/// These never fail a load; the record is skipped and the rest of the index
/// is kept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordShapeError {
    #[error("record {position} is {kind}, not an object")]
    NotAnObject { position: usize, kind: &'static str },

    #[error("record {position} has no usable id")]
    MissingId { position: usize },
}

/// Name a json value's kind for diagnostics.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value as V;
    match value {
        V::Null => "null",
        V::Bool(_) => "a boolean",
        V::Number(_) => "a number",
        V::String(_) => "a string",
        V::Array(_) => "an array",
        V::Object(_) => "an object",
    }
}
