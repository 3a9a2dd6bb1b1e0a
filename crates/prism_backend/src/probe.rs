//! Capability probe hook
//!
//! The real implementation queries the native graphics stack; test doubles
//! return canned reports. A probe never fails: when the platform cannot be
//! inspected it returns an all-missing report so selection always has a
//! uniform input.

use prism_core::{CapabilityRequest, DeviceCapabilityReport, MonotonicClock};
use std::sync::Arc;

/// Probes the current device/platform. No side effects on renderer state;
/// deterministic for a fixed device/driver state.
pub trait CapabilityProbe: Send + Sync {
    fn detect(&self, request: &CapabilityRequest) -> DeviceCapabilityReport;
}

/// Probe for platforms with no usable graphics stack. Reports every feature
/// missing so selection degrades to its failure path instead of erroring.
pub struct NullProbe {
    clock: Arc<dyn MonotonicClock>,
}

impl NullProbe {
    pub fn new(clock: Arc<dyn MonotonicClock>) -> Self {
        Self { clock }
    }
}

impl CapabilityProbe for NullProbe {
    fn detect(&self, request: &CapabilityRequest) -> DeviceCapabilityReport {
        tracing::debug!("capability probe unavailable, reporting all features missing");
        let mut report = DeviceCapabilityReport::unavailable(self.clock.now_ms());
        if request.include_debug_info {
            // Debug fields must be non-blank whenever the flag is set.
            report.device_id = "unknown-device".to_string();
            report.driver_version = "unknown".to_string();
            report.os_build = std::env::consts::OS.to_string();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{BackendFeature, FeatureStatus, FixedClock};

    #[test]
    fn null_probe_reports_all_missing() {
        let probe = NullProbe::new(Arc::new(FixedClock::new(42)));
        let report = probe.detect(&CapabilityRequest::default());
        for &feature in BackendFeature::ALL {
            assert_eq!(report.status(feature), FeatureStatus::Missing);
        }
        assert_eq!(report.captured_at_ms, 42);
    }

    #[test]
    fn debug_info_fields_are_populated_when_requested() {
        let probe = NullProbe::new(Arc::new(FixedClock::new(0)));
        let report = probe.detect(&CapabilityRequest {
            include_debug_info: true,
        });
        assert!(!report.device_id.is_empty());
        assert!(!report.driver_version.is_empty());
    }

    #[test]
    fn debug_info_fields_stay_blank_by_default() {
        let probe = NullProbe::new(Arc::new(FixedClock::new(0)));
        let report = probe.detect(&CapabilityRequest::default());
        assert!(report.device_id.is_empty());
    }
}
