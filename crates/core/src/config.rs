//! Configuration structures for the tickfence outlier detector.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default Tukey's fences multiplier.
pub const DEFAULT_K: f64 = 1.5;

/// Default sub-window size in points.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Tukey's fences multiplier applied to the IQR.
    pub k: f64,
    /// Sub-window size in points (flush cadence).
    pub window_size: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl DetectorConfig {
    /// Create a configuration, rejecting invalid parameters up front.
    pub fn new(k: f64, window_size: usize) -> Result<Self> {
        let config = Self { k, window_size };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// A zero window size has no meaningful flush cadence and is rejected
    /// rather than silently defaulted. `k` may be any finite value: negative
    /// multipliers narrow the fences inside `[Q1, Q3]` but are legal.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::config("window_size must be a positive integer"));
        }
        if !self.k.is_finite() {
            return Err(Error::config(format!("k must be finite, got {}", self.k)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.window_size, 5);
        assert!((config.k - 1.5).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(DetectorConfig::new(1.5, 0).is_err());
    }

    #[test]
    fn test_negative_k_accepted() {
        // Negative k narrows the fences but must not error.
        let config = DetectorConfig::new(-1.0, 5).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = DetectorConfig::new(3.0, 20).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: DetectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window_size, 20);
        assert!((back.k - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_finite_k_rejected() {
        assert!(DetectorConfig::new(f64::NAN, 5).is_err());
        assert!(DetectorConfig::new(f64::INFINITY, 5).is_err());
    }
}
