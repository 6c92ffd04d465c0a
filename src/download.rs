//! One full download: fetch, persist, transform, rewrite.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::fetch::{HttpClient, fetch_bytes};
use crate::output::{write_epochs, write_raw};
use crate::request::TideRequest;
use crate::transform::transform_file;

/// What a completed download left in the output file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub rows: usize,
    pub first_epoch: Option<i64>,
    pub last_epoch: Option<i64>,
}

impl DownloadSummary {
    pub fn from_epochs(epochs: &[i64]) -> Self {
        Self {
            rows: epochs.len(),
            first_epoch: epochs.first().copied(),
            last_epoch: epochs.last().copied(),
        }
    }
}

/// Fetches predictions for `request` and leaves the epoch table at `path`.
///
/// The raw response is written to `path` first and read back from there, so
/// after a failed transform the file still holds what the service sent.
#[tracing::instrument(
    skip(client, request, path),
    fields(
        station = %request.station,
        begin = %request.begin_date,
        end = %request.end_date,
        path = %path.display(),
    )
)]
pub async fn download_tide_table<C: HttpClient>(
    client: &C,
    base_url: &str,
    application: &str,
    request: &TideRequest,
    path: &Path,
) -> Result<DownloadSummary> {
    let url = request.query_url(base_url, application);
    info!(url = %url, "Requesting tide predictions");

    let bytes = fetch_bytes(client, &url).await?;
    write_raw(path, &bytes)?;

    let epochs = transform_file(path)?;
    write_epochs(path, &epochs)?;

    let summary = DownloadSummary::from_epochs(&epochs);
    info!(
        rows = summary.rows,
        first_epoch = ?summary.first_epoch,
        last_epoch = ?summary.last_epoch,
        "Tide table written"
    );
    Ok(summary)
}
