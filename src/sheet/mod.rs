pub mod envelope;
pub mod types;
pub mod write;

pub use envelope::{parse_envelope, Table};
pub use types::{iso_millis, NormalizedTable, RunManifest};
pub use write::{touch, write_json};
