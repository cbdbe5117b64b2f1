use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use unicorn_cache::{fetch, pipeline, Config, Registry};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("refreshing unicorn data cache");

    if let Err(e) = refresh().await {
        error!("cache update failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn refresh() -> Result<()> {
    // ─── 2) configure ────────────────────────────────────────────────
    let config = Config::from_env().context("loading configuration")?;
    let client = fetch::build_client(config.http_timeout).context("building HTTP client")?;
    let registry = Registry::builtin().context("loading source registry")?;
    info!(
        "{} sources → {}",
        registry.len(),
        config.cache_dir.display()
    );

    // ─── 3) fetch, normalize, persist ────────────────────────────────
    let outcome = pipeline::run(&client, &registry, &config.cache_dir)
        .await
        .with_context(|| format!("syncing into {}", config.cache_dir.display()))?;

    // ─── 4) summary ──────────────────────────────────────────────────
    let m = &outcome.manifest;
    info!("cache updated");
    info!("total sources: {}", m.total_sources);
    info!("fetched: {}", m.successful_sources);
    info!("files saved: {}", m.saved_filenames.len());
    for file in &m.saved_filenames {
        info!("  • {}", file);
    }
    info!("manifest: {}", outcome.manifest_path.display());
    info!("timestamp: {}", m.generated_at);
    Ok(())
}
