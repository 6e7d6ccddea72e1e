//! Delimited-text reading of (date, price) series.
//!
//! The schema is strict: a header row naming `Date` and `Price` columns,
//! dates in day/month/year form, prices as real numbers. The first
//! unparseable row aborts the read with its file line number; rows are
//! never skipped or coerced.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tickfence_core::{parse_point_date, Error, Point, Result};
use tracing::debug;

/// Header name of the date column.
const DATE_COLUMN: &str = "Date";

/// Header name of the price column.
const PRICE_COLUMN: &str = "Price";

/// Reader for `Date,Price` delimited text.
#[derive(Debug, Clone, Copy)]
pub struct SeriesReader {
    delimiter: u8,
}

impl SeriesReader {
    /// Create a reader using the given single-byte field delimiter.
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read all points from the input, preserving file order.
    pub fn read_points<R: Read>(&self, input: R) -> Result<Vec<Point>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let price_idx = column_index(&headers, PRICE_COLUMN)?;

        let mut points = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Header occupies line 1; data rows start at line 2.
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row + 2);
            points.push(parse_record(&record, line, date_idx, price_idx)?);
        }

        debug!(points = points.len(), "input series read");
        Ok(points)
    }
}

/// Find a required column by header name.
fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::data(format!("missing required column '{name}'")))
}

/// Parse one data row into a point, failing fast with its line number.
fn parse_record(
    record: &StringRecord,
    line: usize,
    date_idx: usize,
    price_idx: usize,
) -> Result<Point> {
    let date_field = record
        .get(date_idx)
        .ok_or_else(|| Error::malformed_record(line, "missing date field"))?;
    let price_field = record
        .get(price_idx)
        .ok_or_else(|| Error::malformed_record(line, "missing price field"))?;

    let date = parse_point_date(date_field)
        .map_err(|e| Error::malformed_record(line, e.to_string()))?;
    let price: f64 = price_field
        .parse()
        .map_err(|_| Error::malformed_record(line, format!("invalid price '{price_field}'")))?;

    Ok(Point::new(date, price))
}
