//! Frame timing and budget evaluation types

use crate::BackendId;
use serde::{Deserialize, Serialize};

/// One rendered frame's timing. Transient; consumed immediately into the
/// governor's rolling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub backend: BackendId,
    pub frame_time_ms: f64,
    pub gpu_time_ms: f64,
    pub cpu_time_ms: f64,
    pub timestamp_ms: u64,
}

/// How many most-recent frames budget evaluation considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameWindow {
    pub size: usize,
}

impl Default for FrameWindow {
    fn default() -> Self {
        Self { size: 120 }
    }
}

/// Result of closing an initialization trace.
///
/// Exceeding the budget is a degradation signal, never fatal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitializationStats {
    pub backend: BackendId,
    pub init_time_ms: u64,
    pub within_budget: bool,
}

/// Rolling-window verdict on sustained frame-rate health.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceAssessment {
    pub avg_fps: f64,
    pub min_fps: f64,
    /// Frames actually available; never exceeds the configured window size.
    pub frame_count: usize,
    pub within_budget: bool,
    pub notes: Option<String>,
}
