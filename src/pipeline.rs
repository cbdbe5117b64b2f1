// src/pipeline.rs

use chrono::Utc;
use reqwest::Client;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::SyncError,
    fetch::fetch_envelope,
    registry::{Registry, SourceConfig},
    sheet::{parse_envelope, write_json, NormalizedTable, RunManifest},
};

/// Written after every run, next to the per-source files.
pub const MANIFEST_FILENAME: &str = "unicorn-metadata.json";

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub manifest: RunManifest,
    pub manifest_path: PathBuf,
}

/// Fetch, normalize and persist every source in `registry`, then write the
/// manifest.
///
/// A source that fails is logged and skipped. Only failures outside the
/// per-source loop (cache dir, manifest) return `Err`.
#[instrument(level = "info", skip_all, fields(cache_dir = %cache_dir.display()))]
pub async fn run(
    client: &Client,
    registry: &Registry,
    cache_dir: &Path,
) -> Result<RunOutcome, SyncError> {
    prepare_cache_dir(cache_dir)?;

    let mut saved = Vec::with_capacity(registry.len());
    for source in registry.iter() {
        info!(source = %source.name, "fetching");
        match sync_source(client, source, cache_dir).await {
            Ok(table) => {
                info!(
                    source = %source.name,
                    rows = table.row_count,
                    file = %source.output_filename,
                    "saved"
                );
                saved.push(source.output_filename.clone());
            }
            Err(e) => {
                warn!(source = %source.name, error = %e, "skipping source");
            }
        }
    }

    let manifest = RunManifest::assemble(registry.names(), saved, Utc::now());
    let manifest_path = cache_dir.join(MANIFEST_FILENAME);
    write_json(&manifest_path, &manifest).map_err(|source| SyncError::Persist {
        path: manifest_path.clone(),
        source,
    })?;

    Ok(RunOutcome {
        manifest,
        manifest_path,
    })
}

/// One source end to end. Nothing is left on disk unless this returns `Ok`.
async fn sync_source(
    client: &Client,
    source: &SourceConfig,
    cache_dir: &Path,
) -> Result<NormalizedTable, SyncError> {
    let body = fetch_envelope(client, &source.locator).await?;
    let table = NormalizedTable::new(source, parse_envelope(&body)?, Utc::now());

    let path = cache_dir.join(&source.output_filename);
    write_json(&path, &table).map_err(|e| SyncError::Persist { path, source: e })?;
    Ok(table)
}

fn prepare_cache_dir(dir: &Path) -> Result<(), SyncError> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| SyncError::Setup {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("created {}", dir.display());
    Ok(())
}
