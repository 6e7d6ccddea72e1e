//! Growing, self-cleaning sub-window and flush control.
//!
//! The detector scans the input once, in order. Each incoming point is
//! appended to the current window, the whole window is re-partitioned
//! against its own fences, and the window is replaced by the within-fences
//! subset. An evicted point therefore never contributes to any later
//! quartile computation within the same sub-window. At each flush boundary
//! the window's survivors are committed to the clean output and the window
//! is reset.

use tickfence_core::{DetectorConfig, OutlierNotice, Point, Result, RunStats};
use tracing::debug;

use crate::fence::partition;

/// The current in-progress sub-window of points.
///
/// Owned buffer semantics: the contents are taken out wholesale for each
/// classification pass and replaced by the kept subset, so there is never
/// aliasing between the live window and what was flushed or evicted.
#[derive(Debug, Default)]
pub struct WindowBuffer {
    points: Vec<Point>,
}

impl WindowBuffer {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to the window.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Take the window's contents, leaving it empty.
    pub fn take(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.points)
    }

    /// Replace the window's contents with the kept subset of a pass.
    pub fn replace(&mut self, kept: Vec<Point>) {
        self.points = kept;
    }

    /// Number of points currently in the window.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The window's current contents.
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

/// Final result of a detection run.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Retained points, in original relative order.
    pub clean: Vec<Point>,
    /// Running counters for the whole run.
    pub stats: RunStats,
    /// One notice per classification pass that flagged at least one outlier.
    pub notices: Vec<OutlierNotice>,
}

/// Streaming single-pass outlier detector.
///
/// Points are fed one at a time with [`push`](Detector::push) and the run is
/// closed with [`finish`](Detector::finish), which performs the final flush.
/// Feeding points individually lets a host check a cancellation flag between
/// points, so a stop request never splits a point-processing step.
#[derive(Debug)]
pub struct Detector {
    config: DetectorConfig,
    window: WindowBuffer,
    clean: Vec<Point>,
    notices: Vec<OutlierNotice>,
    stats: RunStats,
    /// 0-based index of the next incoming point.
    index: usize,
}

impl Detector {
    /// Create a detector, rejecting an invalid configuration up front.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            window: WindowBuffer::new(),
            clean: Vec::new(),
            notices: Vec::new(),
            stats: RunStats::default(),
            index: 0,
        })
    }

    /// Process the next point of the series.
    ///
    /// Appends the point, re-partitions the window against its own fences,
    /// evicts any outliers, and flushes the survivors when the point's index
    /// satisfies `index % window_size == 0`. Because index 0 satisfies the
    /// flush test, the very first point is always committed as a singleton
    /// sub-window; later sub-windows span `window_size` points each. The
    /// clean output and outlier counts depend on that cadence, so it must
    /// not be changed.
    pub fn push(&mut self, point: Point) -> Result<()> {
        let i = self.index;
        self.index += 1;
        self.stats.total_read += 1;

        self.window.push(point);

        // The window holds at least the point just appended, so the
        // empty-set classification error is unreachable here.
        let pass = partition(self.window.take(), self.config.k)?;
        self.stats.total_outliers += pass.outliers.len();
        if !pass.outliers.is_empty() {
            self.notices.push(OutlierNotice {
                at_index: i,
                points: pass.outliers,
            });
        }
        self.window.replace(pass.kept);

        if i % self.config.window_size == 0 {
            self.flush();
        }
        Ok(())
    }

    /// Commit the window's survivors to the clean output and reset it.
    fn flush(&mut self) {
        let flushed = self.window.take();
        debug!(points = flushed.len(), "flushing sub-window");
        self.clean.extend(flushed);
    }

    /// Close the run: flush the residual window and return the results.
    ///
    /// This is the last-index flush boundary; if the final point already
    /// flushed on its modulo boundary the window is empty and this is a
    /// no-op.
    pub fn finish(mut self) -> Detection {
        self.flush();
        Detection {
            clean: self.clean,
            stats: self.stats,
            notices: self.notices,
        }
    }

    /// Number of points processed so far.
    pub fn points_seen(&self) -> usize {
        self.index
    }

    /// The in-progress window's current contents.
    pub fn window(&self) -> &[Point] {
        self.window.as_slice()
    }
}

/// Run the detector over a full slice of points.
pub fn detect(points: &[Point], config: &DetectorConfig) -> Result<Detection> {
    let mut detector = Detector::new(config.clone())?;
    for point in points {
        detector.push(point.clone())?;
    }
    Ok(detector.finish())
}
