//! Error types

use std::io;

use derive_more::derive::{Display, Error, From};

use crate::schema::RefError;

/// Top-level Errors
///
/// Structural failures terminate an operation with one of these values;
/// validation findings travel separately as diagnostics.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// I/O error.
    #[display("I/O error")]
    Io(io::Error),

    /// The document is not parseable JSON.
    #[display("error JS0001: malformed JSON text")]
    #[from(skip)]
    MalformedJson(serde_json::Error),

    /// A schema keyword holds the wrong JSON type.
    #[display("error JS0002: a schema keyword holds the wrong JSON type")]
    #[from(skip)]
    TypeMismatch(serde_json::Error),

    /// JSON error.
    #[display("JSON serialization failed")]
    Serialize(serde_json::Error),

    /// Reference error.
    #[display("reference error")]
    Ref(RefError),

    /// A schema-supplied pattern failed to compile.
    #[display("a schema pattern is not a valid regex")]
    Pattern(regex::Error),
}

impl Error {
    /// Classifies a deserialization failure: data-shape problems are
    /// keyword type mismatches, everything else is malformed text.
    pub(crate) fn read(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Data => Self::TypeMismatch(err),
            _ => Self::MalformedJson(err),
        }
    }
}
