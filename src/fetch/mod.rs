// src/fetch/mod.rs

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::TransportError;

/// Build the HTTP client used for every source. `timeout` bounds each whole
/// request; without one a stalled endpoint stalls the run.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build()
}

/// GET `locator` and return the body text. No retries.
pub async fn fetch_envelope(client: &Client, locator: &str) -> Result<String, TransportError> {
    debug!("fetching {}", locator);
    let request_err = |source: reqwest::Error| TransportError::Request {
        url: locator.to_string(),
        source,
    };

    let resp = client.get(locator).send().await.map_err(request_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: locator.to_string(),
            status,
        });
    }
    resp.text().await.map_err(request_err)
}
