//! Runtime settings and the backend profile catalogue

use prism_core::{
    BackendFeature, BackendId, BackendProfile, FrameWindow, PerformanceBudget, SurfaceConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration: surface request, budgets, and the catalogue of
/// backend profiles selection negotiates over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSettings {
    pub surface: SurfaceConfig,
    pub window: FrameWindow,
    pub budget: PerformanceBudget,
    /// Hard timeout for one initialization attempt.
    pub init_timeout_ms: u64,
    /// Advisory budget the governor evaluates initialization against.
    pub init_budget_ms: u64,
    pub profiles: Vec<BackendProfile>,
}

fn profile(
    backend: BackendId,
    priority: u32,
    api_version: &str,
    features: &[BackendFeature],
    targets: &[&str],
) -> BackendProfile {
    BackendProfile {
        backend,
        supported_features: features.iter().copied().collect(),
        budget: PerformanceBudget::default(),
        fallback_priority: priority,
        api_version: api_version.to_string(),
        platform_targets: targets.iter().map(|t| t.to_string()).collect(),
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            window: FrameWindow::default(),
            budget: PerformanceBudget::default(),
            init_timeout_ms: 5000,
            init_budget_ms: 3000,
            profiles: vec![
                profile(
                    BackendId::Vulkan,
                    1,
                    "1.3",
                    &[BackendFeature::Compute],
                    &["linux", "windows", "android"],
                ),
                profile(
                    BackendId::Metal,
                    2,
                    "3.0",
                    &[BackendFeature::Compute],
                    &["macos", "ios"],
                ),
                profile(
                    BackendId::Dx12,
                    3,
                    "12.1",
                    &[BackendFeature::Compute],
                    &["windows"],
                ),
                profile(
                    BackendId::WebGpu,
                    4,
                    "1.0",
                    &[BackendFeature::Compute],
                    &["web"],
                ),
                // Last resort: claims nothing, validates anywhere.
                profile(BackendId::OpenGl, 9, "3.3", &[], &["linux", "windows", "macos"]),
            ],
        }
    }
}

impl RuntimeSettings {
    /// Load settings from a JSON file, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    tracing::info!(path = %path.display(), "loaded runtime settings");
                    settings
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue_orders_vulkan_first() {
        let settings = RuntimeSettings::default();
        let lowest = settings
            .profiles
            .iter()
            .min_by_key(|p| p.fallback_priority)
            .unwrap();
        assert_eq!(lowest.backend, BackendId::Vulkan);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = RuntimeSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: RuntimeSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.profiles.len(), settings.profiles.len());
        assert_eq!(back.init_timeout_ms, 5000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = RuntimeSettings::load_or_default(Path::new("/nonexistent/prism.json"));
        assert_eq!(settings.init_budget_ms, 3000);
    }
}
