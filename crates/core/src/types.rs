//! Core data types for the tickfence outlier detector.

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Price type with total ordering support (for sorting inside quantile math).
pub type Price = OrderedFloat<f64>;

/// Date format used by the delimited input and output files.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A single (date, price) observation from the input series.
///
/// Points are immutable once read; their position in the input sequence is
/// significant and is never re-sorted by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Observed price.
    pub price: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Price as an ordering key.
    #[inline]
    pub fn price_key(&self) -> Price {
        OrderedFloat(self.price)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.price)
    }
}

/// Parse a date string in the input's day/month/year form.
pub fn parse_point_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| Error::data(format!("invalid date '{s}': {e}")))
}

/// Format a date back into the input's day/month/year form.
#[inline]
pub fn format_point_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Running counters for a detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Total points read from the input.
    pub total_read: usize,
    /// Total points flagged as outliers across the whole run.
    pub total_outliers: usize,
}

impl RunStats {
    /// Number of points retained in the clean output.
    #[inline]
    pub fn total_clean(&self) -> usize {
        self.total_read - self.total_outliers
    }
}

/// Points evicted by a single classification pass.
///
/// One notice is produced per pass that flags at least one outlier; passes
/// with no outliers produce nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierNotice {
    /// 0-based input index of the point whose arrival triggered the pass.
    pub at_index: usize,
    /// The evicted points, in their original relative order.
    pub points: Vec<Point>,
}

impl std::fmt::Display for OutlierNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Outliers found at index {}:", self.at_index)?;
        for point in &self.points {
            writeln!(f, "  {point}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point_date() {
        let date = parse_point_date("25/12/2019").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2019, 12, 25).unwrap());
    }

    #[test]
    fn test_parse_point_date_rejects_iso() {
        // Input contract is day/month/year, not ISO.
        assert!(parse_point_date("2019-12-25").is_err());
    }

    #[test]
    fn test_date_round_trip() {
        let date = parse_point_date("01/02/2020").unwrap();
        assert_eq!(format_point_date(date), "01/02/2020");
    }

    #[test]
    fn test_stats_total_clean() {
        let stats = RunStats {
            total_read: 10,
            total_outliers: 3,
        };
        assert_eq!(stats.total_clean(), 7);
    }

    #[test]
    fn test_notice_display_lists_points() {
        let notice = OutlierNotice {
            at_index: 2,
            points: vec![Point::new(
                NaiveDate::from_ymd_opt(2019, 1, 3).unwrap(),
                1000.0,
            )],
        };
        let text = notice.to_string();
        assert!(text.contains("index 2"));
        assert!(text.contains("03/01/2019"));
        assert!(text.contains("1000"));
    }
}
