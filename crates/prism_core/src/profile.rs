//! Configuration-supplied backend profiles

use crate::{BackendFeature, BackendId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Frame-rate budget for a backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBudget {
    pub target_fps: f64,
    pub min_fps: f64,
}

impl Default for PerformanceBudget {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            min_fps: 30.0,
        }
    }
}

/// What a backend implementation claims to support, and where it sits in
/// the fallback order. Supplied by configuration, not produced at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendProfile {
    pub backend: BackendId,
    pub supported_features: BTreeSet<BackendFeature>,
    #[serde(default)]
    pub budget: PerformanceBudget,
    /// Lower is tried first when falling back.
    pub fallback_priority: u32,
    pub api_version: String,
    pub platform_targets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_sixty_thirty() {
        let budget = PerformanceBudget::default();
        assert_eq!(budget.target_fps, 60.0);
        assert_eq!(budget.min_fps, 30.0);
    }

    #[test]
    fn profile_deserializes_with_defaulted_budget() {
        let json = r#"{
            "backend": "Vulkan",
            "supported_features": ["Compute", "RayTracing"],
            "fallback_priority": 1,
            "api_version": "1.3",
            "platform_targets": ["linux", "windows", "android"]
        }"#;
        let profile: BackendProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.backend, BackendId::Vulkan);
        assert_eq!(profile.budget.target_fps, 60.0);
        assert!(profile.supported_features.contains(&BackendFeature::RayTracing));
    }
}
