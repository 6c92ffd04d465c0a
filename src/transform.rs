//! Conversion of the raw prediction table into epoch seconds.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Header of the timestamp column in data getter CSV responses.
pub const DATE_TIME_COLUMN: &str = "Date Time";

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The only column read from a prediction row; the rest are ignored.
#[derive(Debug, Deserialize)]
struct PredictionRow {
    #[serde(rename = "Date Time")]
    date_time: String,
}

/// Parses a `Date Time` value such as `2023-01-15 00:00`.
pub fn parse_date_time(value: &str) -> Result<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("unrecognised timestamp '{value}'"))
}

/// Seconds since the Unix epoch for a UTC timestamp.
///
/// Goes through nanoseconds and truncates toward zero, so sub-second parts
/// before 1970 round up to the next whole second.
pub fn epoch_seconds(dt: NaiveDateTime) -> Result<i64> {
    let nanos = dt
        .and_utc()
        .timestamp_nanos_opt()
        .ok_or_else(|| anyhow!("timestamp {dt} is outside the representable range"))?;
    Ok(nanos / NANOS_PER_SECOND)
}

/// Reads the `Date Time` column of the CSV file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read, has no `Date Time` column, or holds a
/// value that is not a timestamp.
pub fn read_date_times(path: &Path) -> Result<Vec<NaiveDateTime>> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?;
    if !headers.iter().any(|h| h == DATE_TIME_COLUMN) {
        bail!(
            "{} has no '{}' column (header: {:?})",
            path.display(),
            DATE_TIME_COLUMN,
            headers.iter().collect::<Vec<_>>()
        );
    }

    let mut values = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        // header is line 1
        let row = i + 2;
        let record: PredictionRow =
            result.with_context(|| format!("{} line {}", path.display(), row))?;
        let dt = parse_date_time(&record.date_time)
            .with_context(|| format!("{} line {}", path.display(), row))?;
        values.push(dt);
    }

    debug!(path = %path.display(), rows = values.len(), "Read Date Time column");
    Ok(values)
}

/// Reads the file at `path` and returns its timestamps as epoch seconds, in
/// file order.
pub fn transform_file(path: &Path) -> Result<Vec<i64>> {
    read_date_times(path)?
        .into_iter()
        .map(epoch_seconds)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_epoch_seconds_known_value() {
        let dt = parse_date_time("2023-01-15 00:00").unwrap();
        assert_eq!(epoch_seconds(dt).unwrap(), 1673740800);
    }

    #[test]
    fn test_parse_date_time_with_seconds() {
        let dt = parse_date_time("2023-01-15 06:11:30").unwrap();
        assert_eq!(epoch_seconds(dt).unwrap(), 1673740800 + 6 * 3600 + 11 * 60 + 30);
    }

    #[test]
    fn test_parse_date_time_rejects_garbage() {
        assert!(parse_date_time("20230115").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn test_epoch_seconds_truncates_toward_zero() {
        let dt = NaiveDate::from_ymd_opt(1969, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 500)
            .unwrap();
        assert_eq!(epoch_seconds(dt).unwrap(), 0);
    }

    #[test]
    fn test_epoch_seconds_out_of_range() {
        let dt = NaiveDate::from_ymd_opt(2300, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(epoch_seconds(dt).is_err());
    }

    #[test]
    fn test_transform_file_noaa_layout() {
        let path = temp_path("tide_table_downloader_test_transform.csv");
        fs::write(
            &path,
            "Date Time, Prediction, Type\n\
             2023-01-15 00:00,1.234,H\n\
             2023-01-15 06:11,-0.101,L\n",
        )
        .unwrap();

        let epochs = transform_file(&path).unwrap();
        assert_eq!(epochs, vec![1673740800, 1673763060]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_transform_file_column_not_first() {
        let path = temp_path("tide_table_downloader_test_transform_order.csv");
        fs::write(&path, "Type, Date Time\nH, 2023-01-15 00:00\n").unwrap();

        assert_eq!(transform_file(&path).unwrap(), vec![1673740800]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_transform_file_missing_column() {
        let path = temp_path("tide_table_downloader_test_transform_missing.csv");
        fs::write(&path, "Error: No Predictions data was found.\n").unwrap();

        let err = transform_file(&path).unwrap_err();
        assert!(err.to_string().contains("Date Time"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_transform_file_rejects_its_own_output() {
        let path = temp_path("tide_table_downloader_test_transform_rerun.csv");
        fs::write(&path, "1673740800\n1673763060\n").unwrap();

        assert!(transform_file(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_transform_file_reports_bad_row() {
        let path = temp_path("tide_table_downloader_test_transform_bad.csv");
        fs::write(
            &path,
            "Date Time, Prediction, Type\n2023-01-15 00:00,1.2,H\nnot a date,0.1,L\n",
        )
        .unwrap();

        let err = transform_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));

        fs::remove_file(&path).unwrap();
    }
}
