//! Backend and feature identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete GPU API implementation the renderer can target.
///
/// Closed set: every match over `BackendId` is exhaustive so adding a
/// backend forces every call site to consider it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendId {
    /// WebGPU (browser and native via wgpu)
    WebGpu,
    /// Vulkan (cross-platform native)
    Vulkan,
    /// Metal (macOS, iOS)
    Metal,
    /// DirectX 12 (Windows)
    Dx12,
    /// OpenGL (legacy fallback)
    OpenGl,
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::WebGpu => "WebGPU",
            Self::Vulkan => "Vulkan",
            Self::Metal => "Metal",
            Self::Dx12 => "DirectX 12",
            Self::OpenGl => "OpenGL",
        };
        f.write_str(name)
    }
}

/// A capability a backend profile may require from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendFeature {
    Compute,
    RayTracing,
    XrSurface,
    MultiView,
    TimestampQuery,
}

impl BackendFeature {
    /// All feature variants, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Compute,
        Self::RayTracing,
        Self::XrSurface,
        Self::MultiView,
        Self::TimestampQuery,
    ];
}

impl fmt::Display for BackendFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Compute => "COMPUTE",
            Self::RayTracing => "RAY_TRACING",
            Self::XrSurface => "XR_SURFACE",
            Self::MultiView => "MULTI_VIEW",
            Self::TimestampQuery => "TIMESTAMP_QUERY",
        };
        f.write_str(name)
    }
}

/// Whether the device actually provides a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureStatus {
    /// Natively available on the device.
    Supported,
    /// Not available at all.
    Missing,
    /// Available only through a driver or software emulation layer.
    Emulated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_display_matches_wire_names() {
        assert_eq!(BackendFeature::Compute.to_string(), "COMPUTE");
        assert_eq!(BackendFeature::RayTracing.to_string(), "RAY_TRACING");
        assert_eq!(BackendFeature::XrSurface.to_string(), "XR_SURFACE");
    }
}
