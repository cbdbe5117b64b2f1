//! Mirror published Google Sheets tables into local JSON files.

pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod registry;
pub mod sheet;

pub use config::Config;
pub use error::{EnvelopeError, SyncError, TransportError};
pub use pipeline::{run, RunOutcome, MANIFEST_FILENAME};
pub use registry::{Registry, SourceConfig};
