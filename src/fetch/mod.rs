//! HTTP retrieval of the raw tide table.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Issues one GET for `url` and returns the response body.
///
/// # Errors
///
/// Returns an error if the URL does not parse, the request fails, or the
/// server answers with a non-success status (the body is included in the
/// message).
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid request URL '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("Data getter returned status {}: {}", status, body));
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(status = %status, bytes = bytes.len(), "Response received");
    Ok(bytes)
}
