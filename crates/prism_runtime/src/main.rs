//! Prism Runtime
//!
//! Boot binary: probes device capabilities, negotiates a rendering backend,
//! brings it up under budget, and reports initialization health before
//! handing the backend handle to the rendering subsystem.

mod settings;

use anyhow::Result;
use prism_backend::{select_backend, BackendInitializer, CapabilityProbe};
use prism_core::{BackendSelection, CapabilityRequest, MonotonicClock, SystemClock};
use prism_governor::PerformanceGovernor;
use prism_platform::{WgpuCapabilityProbe, WgpuPlatform};
use settings::RuntimeSettings;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    tracing::info!("Prism Runtime v{}", prism_core::VERSION);
    let settings = RuntimeSettings::load_or_default(Path::new("prism.json"));

    let clock: Arc<dyn MonotonicClock> = Arc::new(SystemClock::new());
    let mut governor =
        PerformanceGovernor::with_config(clock.clone(), settings.window, settings.budget);
    governor.set_init_budget_ms(settings.init_budget_ms);

    let probe = WgpuCapabilityProbe::new(clock.clone());
    let report = probe.detect(&CapabilityRequest {
        include_debug_info: true,
    });
    tracing::info!(
        device = %report.device_id,
        driver = %report.driver_version,
        "capability report captured"
    );

    let selection = select_backend(&report, &settings.profiles);
    let backend = match &selection {
        BackendSelection::Preferred { backend, .. } => {
            tracing::info!(%backend, "using preferred backend");
            *backend
        }
        BackendSelection::Fallback { backend, .. } => {
            tracing::info!(%backend, "preferred backend unavailable, using fallback");
            *backend
        }
        BackendSelection::Failed { message } => {
            tracing::error!(%message, "no compatible rendering backend");
            anyhow::bail!("backend negotiation failed: {message}");
        }
    };

    governor.begin_initialization_trace(backend);
    let initializer = BackendInitializer::with_timeout(
        WgpuPlatform::new(),
        Duration::from_millis(settings.init_timeout_ms),
    );
    let handle = initializer.initialize(&selection, &settings.surface).await?;
    if let Some(stats) = governor.end_initialization_trace(backend) {
        tracing::info!(
            init_time_ms = stats.init_time_ms,
            within_budget = stats.within_budget,
            "initialization trace closed"
        );
    }

    tracing::info!(
        backend = %handle.backend,
        surface = %handle.surface.surface_id,
        width = handle.width(),
        height = handle.height(),
        "backend ready, handing off to renderer"
    );

    Ok(())
}
