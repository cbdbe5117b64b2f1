// src/error.rs

use reqwest::StatusCode;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Why a response body could not be turned into a table.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("response body contains no JSON payload")]
    NoPayload,
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("payload has no `table` object")]
    MissingTable,
    #[error("table has no `rows` list")]
    MissingRows,
}

/// Failure talking to a source endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("GET {url} returned {}", status_text(*status))]
    Status { url: String, status: StatusCode },
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Everything that can go wrong during a sync run.
///
/// `Transport`, `MalformedEnvelope` and `Persist` (for a source file) are
/// caught per source; the remaining variants abort the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] EnvelopeError),
    #[error("writing {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preparing cache directory {}: {source}", path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("duplicate source name {0:?}")]
    DuplicateSource(String),
    #[error("invalid source {name:?}: {reason}")]
    InvalidSource { name: String, reason: String },
}
