//! Surface configuration and the opaque handle returned to the renderer

use crate::BackendId;
use serde::{Deserialize, Serialize};

/// Color attachment format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorFormat {
    Bgra8Unorm,
    Rgba8Unorm,
    Rgba16Float,
}

/// Depth attachment format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthFormat {
    Depth24PlusStencil8,
    Depth32Float,
}

/// Presentation scheduling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentMode {
    /// VSync. Always available.
    Fifo,
    Mailbox,
    Immediate,
}

/// Caller-supplied surface request for backend initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub color_format: ColorFormat,
    pub depth_format: DepthFormat,
    pub present_mode: PresentMode,
    pub xr_surface: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            color_format: ColorFormat::Bgra8Unorm,
            depth_format: DepthFormat::Depth24PlusStencil8,
            present_mode: PresentMode::Fifo,
            xr_surface: false,
        }
    }
}

/// What the platform actually created. The platform may clamp the requested
/// dimensions; the resolved values here win.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurfaceDescriptor {
    /// Opaque platform surface identifier.
    pub surface_id: String,
    pub width: u32,
    pub height: u32,
    pub color_format: ColorFormat,
}

/// Live backend handle, owned by the rendering subsystem after handoff.
/// The negotiation layer never mutates it once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendHandle {
    pub backend: BackendId,
    pub surface: RenderSurfaceDescriptor,
}

impl BackendHandle {
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }
}
