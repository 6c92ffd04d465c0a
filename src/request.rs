//! Station and date-range request for the CO-OPS data getter.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

/// Default CO-OPS data getter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Default value sent in the `application` query parameter.
pub const DEFAULT_APPLICATION: &str = "OOI_AScherer";

pub const PRODUCT: &str = "predictions";
pub const DATUM: &str = "MLLW";
pub const TIME_ZONE: &str = "gmt";
pub const INTERVAL: &str = "hilo";
pub const UNITS: &str = "metric";
pub const FORMAT: &str = "csv";

const DATE_FORMAT: &str = "%Y%m%d";

/// A tide prediction request as entered by the user.
///
/// Values are kept exactly as typed; they are sent to the service unencoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TideRequest {
    pub station: String,
    pub begin_date: String,
    pub end_date: String,
}

/// Calendar dates parsed from a [`TideRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl TideRequest {
    pub fn new(
        station: impl Into<String>,
        begin_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            station: station.into(),
            begin_date: begin_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Checks that both dates are `YYYYMMDD` calendar dates in order.
    ///
    /// # Errors
    ///
    /// Returns an error naming the field for an unparsable date, or when the
    /// begin date falls after the end date.
    pub fn validate(&self) -> Result<DateRange> {
        let begin = parse_date("begin date", &self.begin_date)?;
        let end = parse_date("end date", &self.end_date)?;

        if begin > end {
            bail!(
                "begin date {} is after end date {}",
                self.begin_date,
                self.end_date
            );
        }

        Ok(DateRange { begin, end })
    }

    /// Builds the data getter URL for this request.
    ///
    /// Parameter order is fixed: dates and station first, then the product
    /// suffix. No percent-encoding is applied.
    pub fn query_url(&self, base_url: &str, application: &str) -> String {
        format!(
            "{base_url}?begin_date={}&end_date={}&station={}\
             &product={PRODUCT}&datum={DATUM}&time_zone={TIME_ZONE}&interval={INTERVAL}\
             &units={UNITS}&application={application}&format={FORMAT}",
            self.begin_date, self.end_date, self.station,
        )
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("invalid {field} '{value}', expected YYYYMMDD"))
}
