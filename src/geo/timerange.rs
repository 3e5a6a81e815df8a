use crate::{GeoError, GeoResult};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Closed time range with `start <= end`
///
/// Ranges are parsed from the `"start/end"` interval notation used by STAC
/// search requests, where each endpoint is either an RFC 3339 timestamp or
/// a plain `YYYY-MM-DD` date. Date-only endpoints expand to the start and
/// end of day respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a time range from two timestamps
    ///
    /// # Returns
    ///
    /// * `Ok(TimeRange)` - `start <= end` holds
    /// * `Err(GeoError)` - The endpoints are out of order
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GeoResult<Self> {
        if start > end {
            return Err(GeoError::InvalidTimeRange(format!(
                "start ({}) must not be after end ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses a time range from `"start/end"` interval notation
    ///
    /// # Arguments
    ///
    /// * `input` - Interval such as `"2022-01-01/2022-01-15"` or
    ///   `"2022-01-01T06:00:00Z/2022-01-15T18:00:00Z"`
    ///
    /// # Returns
    ///
    /// * `Ok(TimeRange)` - Successfully parsed and ordered
    /// * `Err(GeoError)` - Malformed interval or endpoint
    pub fn parse(input: &str) -> GeoResult<Self> {
        let parts: Vec<&str> = input.split('/').collect();
        if parts.len() != 2 {
            return Err(GeoError::InvalidTimeRange(format!(
                "expected 'start/end', got '{}'",
                input
            )));
        }

        let start = parse_endpoint(parts[0], false)?;
        let end = parse_endpoint(parts[1], true)?;
        Self::new(start, end)
    }

    /// Start of the range
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the range
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Formats the range as an RFC 3339 interval for search requests
    pub fn to_interval(&self) -> String {
        format!(
            "{}/{}",
            self.start.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.end.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_interval())
    }
}

/// Parses one interval endpoint
///
/// A bare date expands to 00:00:00 when it is the start of the range and
/// 23:59:59 when it is the end, matching the inclusive day semantics of
/// date-only catalog queries.
fn parse_endpoint(text: &str, is_end: bool) -> GeoResult<DateTime<Utc>> {
    let trimmed = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        GeoError::InvalidTimeRange(format!("could not parse endpoint '{}': {}", trimmed, e))
    })?;

    let time = if is_end {
        NaiveTime::from_hms_opt(23, 59, 59)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| GeoError::InvalidTimeRange("invalid time of day".to_string()))?;

    Ok(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
}
