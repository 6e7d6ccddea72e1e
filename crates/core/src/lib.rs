//! Core types and configuration for the tickfence outlier detector.
//!
//! This crate provides shared types used across all other crates:
//! - Time series point type (date + price)
//! - Run statistics and outlier notices
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::DetectorConfig;
pub use error::{Error, Result};
pub use types::*;
