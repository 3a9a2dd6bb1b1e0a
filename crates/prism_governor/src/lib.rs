//! Prism Performance Governor
//!
//! Two independent budget tracks over one injected monotonic clock:
//! an initialization-time track (open traces, 3000 ms budget) and a
//! frame-rate track (rolling FIFO window, 60/30 FPS budget). Both tracks
//! report degradation as data and log events; neither is ever fatal.

use dashmap::DashMap;
use prism_core::{
    BackendId, FrameMetrics, FrameWindow, InitializationStats, MonotonicClock,
    PerformanceAssessment, PerformanceBudget,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Default budget for backend initialization, milliseconds.
pub const DEFAULT_INIT_BUDGET_MS: u64 = 3000;

/// Governs initialization and steady-state frame budgets.
///
/// `record_frame` is called once per frame from the render loop;
/// `evaluate_budget` may run concurrently from a diagnostics task, so the
/// window is only ever read through snapshots taken under a short-lived
/// lock. Open traces live in a concurrent map.
pub struct PerformanceGovernor {
    clock: Arc<dyn MonotonicClock>,
    budget: PerformanceBudget,
    init_budget_ms: u64,
    window_size: usize,
    window: Mutex<VecDeque<FrameMetrics>>,
    open_traces: DashMap<BackendId, u64>,
}

impl PerformanceGovernor {
    pub fn new(clock: Arc<dyn MonotonicClock>) -> Self {
        Self::with_config(clock, FrameWindow::default(), PerformanceBudget::default())
    }

    pub fn with_config(
        clock: Arc<dyn MonotonicClock>,
        window: FrameWindow,
        budget: PerformanceBudget,
    ) -> Self {
        // Settings are user-supplied; a zero-sized window would never evict
        // and grow for the session lifetime.
        let window_size = window.size.max(1);
        if window_size != window.size {
            tracing::warn!(configured = window.size, "frame window size clamped to 1");
        }
        Self {
            clock,
            budget,
            init_budget_ms: DEFAULT_INIT_BUDGET_MS,
            window_size,
            window: Mutex::new(VecDeque::with_capacity(window_size)),
            open_traces: DashMap::new(),
        }
    }

    pub fn set_init_budget_ms(&mut self, budget_ms: u64) {
        self.init_budget_ms = budget_ms;
    }

    /// Open an initialization trace. Calling again for the same backend
    /// before `end` overwrites the start time.
    pub fn begin_initialization_trace(&self, backend: BackendId) {
        let start = self.clock.now_ms();
        self.open_traces.insert(backend, start);
        tracing::debug!(%backend, start_ms = start, "initialization trace opened");
    }

    /// Close a trace and evaluate it against the initialization budget.
    ///
    /// Returns `None` when no trace is open for the backend. Exceeding the
    /// budget is reported and logged, never raised; construction of the
    /// renderer continues.
    pub fn end_initialization_trace(&self, backend: BackendId) -> Option<InitializationStats> {
        let Some((_, start)) = self.open_traces.remove(&backend) else {
            tracing::warn!(%backend, "end_initialization_trace without a matching begin");
            return None;
        };
        let init_time_ms = self.clock.now_ms().saturating_sub(start);
        let within_budget = init_time_ms <= self.init_budget_ms;
        if !within_budget {
            tracing::warn!(
                %backend,
                init_time_ms,
                budget_ms = self.init_budget_ms,
                "PERFORMANCE_DEGRADED: initialization exceeded budget"
            );
        }
        Some(InitializationStats {
            backend,
            init_time_ms,
            within_budget,
        })
    }

    /// Append one frame's timing to the rolling window, evicting the oldest
    /// sample once the window is full. Strict FIFO: the window always holds
    /// exactly the most recent samples.
    pub fn record_frame(&self, metrics: FrameMetrics) {
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        while window.len() >= self.window_size {
            window.pop_front();
        }
        window.push_back(metrics);
    }

    /// Immutable snapshot of the current window, oldest first.
    pub fn window_snapshot(&self) -> Vec<FrameMetrics> {
        let window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        window.iter().copied().collect()
    }

    /// Evaluate the frame-rate budget over the current window.
    pub fn evaluate_budget(&self) -> PerformanceAssessment {
        let samples = self.window_snapshot();
        if samples.is_empty() {
            // Not-within-budget assessments always carry the literal note
            // callers pattern-match on.
            return PerformanceAssessment {
                avg_fps: 0.0,
                min_fps: 0.0,
                frame_count: 0,
                within_budget: false,
                notes: Some("Performance below budget: no frames recorded".to_string()),
            };
        }

        let frame_count = samples.len();
        let total_ms: f64 = samples.iter().map(|m| m.frame_time_ms).sum();
        let avg_fps = 1000.0 / (total_ms / frame_count as f64);
        // The single slowest frame in the window sets the floor.
        let worst_ms = samples
            .iter()
            .map(|m| m.frame_time_ms)
            .fold(f64::MIN, f64::max);
        let min_fps = 1000.0 / worst_ms;

        let within_budget = avg_fps >= self.budget.target_fps && min_fps >= self.budget.min_fps;
        let notes = if within_budget {
            None
        } else {
            tracing::warn!(
                avg_fps,
                min_fps,
                target_fps = self.budget.target_fps,
                floor_fps = self.budget.min_fps,
                "PERFORMANCE_DEGRADED: frame budget violated"
            );
            Some(format!(
                "Performance below budget: avg {avg_fps:.1} fps (target {:.0}), min {min_fps:.1} fps (floor {:.0})",
                self.budget.target_fps, self.budget.min_fps
            ))
        };

        PerformanceAssessment {
            avg_fps,
            min_fps,
            frame_count,
            within_budget,
            notes,
        }
    }
}
