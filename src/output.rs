//! Persistence of the raw response and of the epoch table.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One output row: the epoch-second key and no data columns.
#[derive(Debug, Serialize)]
struct EpochRow(i64);

/// Writes the raw response bytes to `path`, replacing any prior contents.
pub fn write_raw(path: &Path, bytes: &[u8]) -> Result<()> {
    debug!(path = %path.display(), bytes = bytes.len(), "Writing raw response");
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// Overwrites `path` with one epoch value per line and no header.
pub fn write_epochs(path: &Path, epochs: &[i64]) -> Result<()> {
    debug!(path = %path.display(), rows = epochs.len(), "Writing epoch table");

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;

    for &epoch in epochs {
        writer.serialize(EpochRow(epoch))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_write_raw_overwrites() {
        let path = temp_path("tide_table_downloader_test_raw.txt");
        fs::write(&path, "stale contents that are longer than the new ones").unwrap();

        write_raw(&path, b"Date Time\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Date Time\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_epochs_has_no_header() {
        let path = temp_path("tide_table_downloader_test_epochs.csv");
        let _ = fs::remove_file(&path);

        write_epochs(&path, &[1673740800, 1673763060]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1673740800\n1673763060\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_epochs_empty_table() {
        let path = temp_path("tide_table_downloader_test_empty.csv");
        fs::write(&path, "old").unwrap();

        write_epochs(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        fs::remove_file(&path).unwrap();
    }
}
