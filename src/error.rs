use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SalonError {
    #[error("unsupported input format: {0} (expected .xml, .fasta or .fa)")]
    UnsupportedInput(String),

    #[error("unsupported RDF serialization for extension: {0}")]
    UnsupportedRdfFormat(String),

    #[error("failed to read {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    #[error("failed to write {path}: {message}")]
    FileWrite { path: PathBuf, message: String },

    #[error("malformed MACSIM/XML: {0}")]
    MalformedXml(String),

    #[error("malformed FASTA: {0}")]
    MalformedFasta(String),

    #[error("invalid resource IRI {iri}: {message}")]
    InvalidIri { iri: String, message: String },

    #[error("failed to parse RDF file: {0}")]
    GraphRead(String),

    #[error("failed to serialize graph: {0}")]
    GraphWrite(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid store backend: {0}")]
    InvalidBackend(String),

    #[error("store request failed: {0}")]
    StoreHttp(String),

    #[error("store returned status {status}: {body}")]
    RemoteQueryFailed { status: u16, body: String },

    #[error("unknown protein existence value: {0}")]
    UnknownVocabularyValue(String),

    #[error("{backend} does not support database creation")]
    UnsupportedOperation { backend: &'static str },

    #[error("digest authentication failed: {0}")]
    DigestAuth(String),
}
