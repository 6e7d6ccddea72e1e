//! Causal Tukey's-fences outlier detection.
//!
//! This crate handles:
//! - Quartile and fence computation (linear-interpolation quantiles)
//! - Partitioning a point set into within-fences and outside-fences subsets
//! - The growing, self-cleaning sub-window and its flush cadence

pub mod fence;
pub mod window;

pub use fence::{partition, FencePartition, Fences};
pub use window::{detect, Detection, Detector, WindowBuffer};
