//! Backend selection
//!
//! Pure function from a capability report and a profile catalogue to a
//! selection decision. Performs no I/O and never panics; every outcome is
//! representable in [`BackendSelection`].

use prism_core::{
    BackendFeature, BackendProfile, BackendSelection, DeviceCapabilityReport, FeatureStatus,
    ParityEntry, ParityMatrix,
};
use std::collections::BTreeSet;

/// Validate a profile's declared features against the report.
///
/// Strict: only [`FeatureStatus::Supported`] satisfies a declared feature.
/// Emulated support fails validation but is reported distinctly in the
/// matrix so diagnostics can tell emulation from absence.
fn validate_parity(profile: &BackendProfile, report: &DeviceCapabilityReport) -> ParityMatrix {
    let entries = profile
        .supported_features
        .iter()
        .map(|&feature| {
            let reported = report.status(feature);
            ParityEntry {
                feature,
                reported,
                satisfied: reported == FeatureStatus::Supported,
            }
        })
        .collect();
    ParityMatrix { entries }
}

/// Choose a backend for the reported device.
///
/// Order: the report's preferred backend if its profile validates, then
/// profiles by ascending `fallback_priority`, first one that validates.
/// When nothing validates the result is [`BackendSelection::Failed`] with a
/// message naming the missing required features.
pub fn select_backend(
    report: &DeviceCapabilityReport,
    profiles: &[BackendProfile],
) -> BackendSelection {
    if let Some(preferred) = report.preferred_backend {
        if let Some(profile) = profiles.iter().find(|p| p.backend == preferred) {
            let parity = validate_parity(profile, report);
            if parity.all_satisfied() {
                tracing::info!(backend = %preferred, "preferred backend validated");
                return BackendSelection::Preferred {
                    backend: preferred,
                    parity,
                };
            }
            tracing::debug!(
                backend = %preferred,
                "preferred backend failed parity validation, falling back"
            );
        }
    }

    let mut ordered: Vec<&BackendProfile> = profiles.iter().collect();
    ordered.sort_by_key(|p| p.fallback_priority);

    for profile in ordered {
        let parity = validate_parity(profile, report);
        if parity.all_satisfied() {
            tracing::info!(backend = %profile.backend, priority = profile.fallback_priority, "fallback backend validated");
            return BackendSelection::Fallback {
                backend: profile.backend,
                parity,
            };
        }
    }

    // Name every feature some profile needs that the device lacks.
    let missing: BTreeSet<BackendFeature> = profiles
        .iter()
        .flat_map(|p| p.supported_features.iter().copied())
        .filter(|&f| report.status(f) != FeatureStatus::Supported)
        .collect();
    let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
    let message = format!("Missing required features: {}", names.join(", "));
    tracing::warn!(%message, "no backend satisfies device capabilities");
    BackendSelection::Failed { message }
}
