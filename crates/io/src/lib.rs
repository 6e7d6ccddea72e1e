//! Delimited-text input and output for the tickfence outlier detector.
//!
//! This crate handles:
//! - Reading a `Date,Price` delimited file into points (strict schema,
//!   fail-fast on malformed rows)
//! - Writing a cleaned point sequence back out in the same format

pub mod reader;
pub mod writer;

pub use reader::SeriesReader;
pub use writer::SeriesWriter;
