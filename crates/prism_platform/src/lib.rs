//! Prism Platform Layer
//!
//! Real implementations of the negotiation hooks over wgpu: adapter
//! enumeration feeds the capability probe, and headless device creation
//! backs the platform initializer. Window/surface presentation belongs to
//! the rendering subsystem, not this crate.

use prism_backend::{CapabilityProbe, PlatformError, PlatformInitializer};
use prism_core::{
    BackendFeature, BackendId, CapabilityRequest, DeviceCapabilityReport, FeatureStatus,
    MonotonicClock, RenderSurfaceDescriptor, SurfaceConfig,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

fn backends_mask(backend: BackendId) -> wgpu::Backends {
    match backend {
        BackendId::WebGpu => wgpu::Backends::BROWSER_WEBGPU,
        BackendId::Vulkan => wgpu::Backends::VULKAN,
        BackendId::Metal => wgpu::Backends::METAL,
        BackendId::Dx12 => wgpu::Backends::DX12,
        BackendId::OpenGl => wgpu::Backends::GL,
    }
}

fn backend_id(backend: wgpu::Backend) -> Option<BackendId> {
    match backend {
        wgpu::Backend::Vulkan => Some(BackendId::Vulkan),
        wgpu::Backend::Metal => Some(BackendId::Metal),
        wgpu::Backend::Dx12 => Some(BackendId::Dx12),
        wgpu::Backend::Gl => Some(BackendId::OpenGl),
        wgpu::Backend::BrowserWebGpu => Some(BackendId::WebGpu),
        _ => None,
    }
}

/// Capability probe backed by wgpu adapter enumeration.
pub struct WgpuCapabilityProbe {
    clock: Arc<dyn MonotonicClock>,
}

impl WgpuCapabilityProbe {
    pub fn new(clock: Arc<dyn MonotonicClock>) -> Self {
        Self { clock }
    }
}

impl CapabilityProbe for WgpuCapabilityProbe {
    fn detect(&self, request: &CapabilityRequest) -> DeviceCapabilityReport {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }));
        let Some(adapter) = adapter else {
            tracing::warn!("no wgpu adapter available, reporting all features missing");
            return DeviceCapabilityReport::unavailable(self.clock.now_ms());
        };

        let info = adapter.get_info();
        let features = adapter.features();
        let downlevel = adapter.get_downlevel_capabilities();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "probed graphics adapter");

        let mut feature_flags = HashMap::new();
        feature_flags.insert(
            BackendFeature::Compute,
            if downlevel
                .flags
                .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
            {
                FeatureStatus::Supported
            } else {
                FeatureStatus::Missing
            },
        );
        feature_flags.insert(
            BackendFeature::TimestampQuery,
            if features.contains(wgpu::Features::TIMESTAMP_QUERY) {
                FeatureStatus::Supported
            } else {
                FeatureStatus::Missing
            },
        );
        feature_flags.insert(
            BackendFeature::MultiView,
            if features.contains(wgpu::Features::MULTIVIEW) {
                FeatureStatus::Supported
            } else {
                FeatureStatus::Missing
            },
        );
        // Not exposed through wgpu's stable surface; callers that need these
        // must go through a dedicated native path.
        feature_flags.insert(BackendFeature::RayTracing, FeatureStatus::Missing);
        feature_flags.insert(BackendFeature::XrSurface, FeatureStatus::Missing);

        let mut limitations = vec![
            "ray tracing not exposed through wgpu".to_string(),
            "XR surfaces require a native runtime".to_string(),
        ];
        if info.device_type == wgpu::DeviceType::Cpu {
            limitations.push("software adapter".to_string());
        }

        let (device_id, driver_version, os_build) = if request.include_debug_info {
            (
                if info.name.is_empty() {
                    "unnamed-adapter".to_string()
                } else {
                    info.name.clone()
                },
                if info.driver_info.is_empty() {
                    "unknown".to_string()
                } else {
                    info.driver_info.clone()
                },
                std::env::consts::OS.to_string(),
            )
        } else {
            (String::new(), String::new(), String::new())
        };

        DeviceCapabilityReport {
            device_id,
            driver_version,
            os_build,
            feature_flags,
            preferred_backend: backend_id(info.backend),
            limitations,
            captured_at_ms: self.clock.now_ms(),
        }
    }
}

/// Platform initializer backed by headless wgpu device creation.
///
/// Created devices are parked here until the rendering subsystem claims
/// them via [`take_device`](Self::take_device); the negotiation core only
/// ever sees the opaque descriptor.
pub struct WgpuPlatform {
    devices: Mutex<HashMap<String, (wgpu::Device, wgpu::Queue)>>,
}

impl WgpuPlatform {
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(HashMap::new()),
        }
    }

    /// Hand ownership of a created device to the rendering subsystem.
    pub fn take_device(&self, surface_id: &str) -> Option<(wgpu::Device, wgpu::Queue)> {
        self.devices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(surface_id)
    }
}

impl Default for WgpuPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformInitializer for WgpuPlatform {
    async fn create_surface(
        &self,
        backend: BackendId,
        config: &SurfaceConfig,
    ) -> Result<RenderSurfaceDescriptor, PlatformError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: backends_mask(backend),
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .ok_or(PlatformError::NoAdapter(backend))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("prism-backend"),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| PlatformError::SurfaceCreation(e.to_string()))?;

        // Clamp the requested extent to what the adapter can texture,
        // mirroring swapchain extent clamping on native surfaces. The
        // resolved values win.
        let max_dim = adapter.limits().max_texture_dimension_2d;
        let width = config.width.min(max_dim);
        let height = config.height.min(max_dim);

        let surface_id = format!("{backend}/{}", adapter.get_info().name);
        self.devices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(surface_id.clone(), (device, queue));

        tracing::info!(%backend, %surface_id, width, height, "headless surface created");
        Ok(RenderSurfaceDescriptor {
            surface_id,
            width,
            height,
            color_format: config.color_format,
        })
    }
}
