//! Prism Runtime Core
//!
//! Contains the shared vocabulary of the backend negotiation layer:
//! - Backend and feature identifiers
//! - Capability reports and backend profiles
//! - Selection outcomes and surface types
//! - Frame metrics and budget types
//! - The injected monotonic clock

pub mod backend;
pub mod capability;
pub mod clock;
pub mod metrics;
pub mod profile;
pub mod selection;
pub mod surface;

pub use backend::{BackendFeature, BackendId, FeatureStatus};
pub use capability::{CapabilityRequest, DeviceCapabilityReport};
pub use clock::{FixedClock, MonotonicClock, SystemClock};
pub use metrics::{FrameMetrics, FrameWindow, InitializationStats, PerformanceAssessment};
pub use profile::{BackendProfile, PerformanceBudget};
pub use selection::{BackendSelection, ParityEntry, ParityMatrix};
pub use surface::{BackendHandle, ColorFormat, DepthFormat, PresentMode, RenderSurfaceDescriptor, SurfaceConfig};

/// Runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
