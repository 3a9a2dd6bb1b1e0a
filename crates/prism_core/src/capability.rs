//! Device capability probing types

use crate::{BackendFeature, BackendId, FeatureStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options for a capability probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityRequest {
    /// When set, the report's device id and driver version are guaranteed
    /// to be non-blank.
    pub include_debug_info: bool,
}

/// Snapshot of what the current device/platform can do.
///
/// Immutable once produced; selection logic only reads it. A probe never
/// fails: an unprobeable platform yields a report with every feature
/// [`FeatureStatus::Missing`] so downstream selection has a uniform input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCapabilityReport {
    pub device_id: String,
    pub driver_version: String,
    pub os_build: String,
    pub feature_flags: HashMap<BackendFeature, FeatureStatus>,
    pub preferred_backend: Option<BackendId>,
    pub limitations: Vec<String>,
    /// Capture time, milliseconds on the probe's monotonic clock.
    pub captured_at_ms: u64,
}

impl DeviceCapabilityReport {
    /// Report for a platform that could not be probed: every known feature
    /// marked missing, no preference.
    pub fn unavailable(captured_at_ms: u64) -> Self {
        Self {
            device_id: String::new(),
            driver_version: String::new(),
            os_build: String::new(),
            feature_flags: BackendFeature::ALL
                .iter()
                .map(|&f| (f, FeatureStatus::Missing))
                .collect(),
            preferred_backend: None,
            limitations: vec!["platform probe unavailable".to_string()],
            captured_at_ms,
        }
    }

    /// Status of a feature, treating absent entries as missing.
    pub fn status(&self, feature: BackendFeature) -> FeatureStatus {
        self.feature_flags
            .get(&feature)
            .copied()
            .unwrap_or(FeatureStatus::Missing)
    }
}
