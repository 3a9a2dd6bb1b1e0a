//! Prism Backend Negotiation
//!
//! Capability probing, backend selection with explicit fallback semantics,
//! and bounded, recoverable backend initialization.

pub mod init;
pub mod probe;
pub mod select;

pub use init::{BackendInitError, BackendInitializer, PlatformError, PlatformInitializer};
pub use probe::{CapabilityProbe, NullProbe};
pub use select::select_backend;
