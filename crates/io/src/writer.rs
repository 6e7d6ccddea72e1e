//! Delimited-text writing of cleaned (date, price) series.

use std::io::Write;

use csv::WriterBuilder;
use tickfence_core::{format_point_date, Point, Result};
use tracing::debug;

/// Writer for `Date,Price` delimited text.
#[derive(Debug, Clone, Copy)]
pub struct SeriesWriter {
    delimiter: u8,
}

impl SeriesWriter {
    /// Create a writer using the given single-byte field delimiter.
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write the header and all points, preserving their order.
    pub fn write_points<W: Write>(&self, output: W, points: &[Point]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);

        writer.write_record(["Date", "Price"])?;
        for point in points {
            writer.write_record([format_point_date(point.date), point.price.to_string()])?;
        }
        writer.flush()?;

        debug!(points = points.len(), "clean series written");
        Ok(())
    }
}
