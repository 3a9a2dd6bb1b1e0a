//! Backend initialization
//!
//! Drives the platform-specific bring-up of a selected backend under a hard
//! time budget. Initialization either returns a complete handle or fails;
//! a timed-out attempt is cancelled and no partial handle escapes.

use prism_core::{BackendHandle, BackendId, BackendSelection, RenderSurfaceDescriptor, SurfaceConfig};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Default hard timeout for one initialization attempt.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Failure from the platform bring-up hook.
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    /// The device was lost mid-creation. Retried once before giving up.
    #[error("device lost: {0}")]
    DeviceLost(String),

    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("no suitable adapter for {0}")]
    NoAdapter(BackendId),
}

impl PlatformError {
    fn is_device_loss(&self) -> bool {
        matches!(self, Self::DeviceLost(_))
    }
}

/// Hard initialization failure. Raised only after a decision has committed
/// to a specific backend; soft "no backend fits" outcomes stay in
/// [`BackendSelection`].
#[derive(Debug, Error)]
pub enum BackendInitError {
    /// Caller error: initialization is never attempted for a failed selection.
    #[error("cannot initialize a failed selection: {message}")]
    SelectionFailed { message: String },

    #[error("{backend} initialization exceeded the {budget_ms} ms budget")]
    Timeout { backend: BackendId, budget_ms: u64 },

    #[error("{backend} platform initialization failed")]
    Platform {
        backend: BackendId,
        #[source]
        source: PlatformError,
    },
}

/// Platform bring-up hook. The real implementation performs device/surface
/// creation against the chosen native API; test doubles simulate latency
/// and failure.
pub trait PlatformInitializer: Send + Sync {
    fn create_surface(
        &self,
        backend: BackendId,
        config: &SurfaceConfig,
    ) -> impl Future<Output = Result<RenderSurfaceDescriptor, PlatformError>> + Send;
}

/// Brings up the selected backend within a time budget.
///
/// Runs once per renderer lifetime (or per backend-switch event); not on
/// the per-frame hot path.
pub struct BackendInitializer<P> {
    platform: P,
    timeout: Duration,
}

impl<P: PlatformInitializer> BackendInitializer<P> {
    pub fn new(platform: P) -> Self {
        Self::with_timeout(platform, DEFAULT_INIT_TIMEOUT)
    }

    pub fn with_timeout(platform: P, timeout: Duration) -> Self {
        Self { platform, timeout }
    }

    /// Initialize the selected backend.
    ///
    /// # Errors
    /// - [`BackendInitError::SelectionFailed`] when the selection carries no
    ///   backend,
    /// - [`BackendInitError::Timeout`] when the platform hook does not
    ///   complete within the budget (the in-flight attempt is cancelled),
    /// - [`BackendInitError::Platform`] when the hook fails, after at most
    ///   one retry on device loss.
    pub async fn initialize(
        &self,
        selection: &BackendSelection,
        config: &SurfaceConfig,
    ) -> Result<BackendHandle, BackendInitError> {
        let backend = match selection {
            BackendSelection::Preferred { backend, .. }
            | BackendSelection::Fallback { backend, .. } => *backend,
            BackendSelection::Failed { message } => {
                return Err(BackendInitError::SelectionFailed {
                    message: message.clone(),
                })
            }
        };

        tracing::info!(%backend, width = config.width, height = config.height, "initializing backend");

        let surface = tokio::time::timeout(self.timeout, self.attempt(backend, config))
            .await
            .map_err(|_| BackendInitError::Timeout {
                backend,
                budget_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(|source| BackendInitError::Platform { backend, source })?;

        if surface.width != config.width || surface.height != config.height {
            tracing::warn!(
                %backend,
                requested_width = config.width,
                requested_height = config.height,
                resolved_width = surface.width,
                resolved_height = surface.height,
                "platform clamped surface dimensions"
            );
        }

        Ok(BackendHandle { backend, surface })
    }

    /// One attempt, with a single retry after device loss. A second failure
    /// of any kind is fatal for the attempt.
    async fn attempt(
        &self,
        backend: BackendId,
        config: &SurfaceConfig,
    ) -> Result<RenderSurfaceDescriptor, PlatformError> {
        match self.platform.create_surface(backend, config).await {
            Err(err) if err.is_device_loss() => {
                tracing::warn!(%backend, %err, "device lost during initialization, retrying once");
                self.platform.create_surface(backend, config).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{ColorFormat, ParityMatrix};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Test double: configurable latency and a number of leading failures.
    struct FakePlatform {
        delay: Duration,
        failures: AtomicU32,
        failure: PlatformError,
        resolved: Option<(u32, u32)>,
    }

    impl FakePlatform {
        fn immediate() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                failures: AtomicU32::new(0),
                failure: PlatformError::DeviceLost("simulated".to_string()),
                resolved: None,
            }
        }

        fn failing(count: u32, failure: PlatformError) -> Self {
            Self {
                delay: Duration::ZERO,
                failures: AtomicU32::new(count),
                failure,
                resolved: None,
            }
        }
    }

    impl PlatformInitializer for FakePlatform {
        async fn create_surface(
            &self,
            backend: BackendId,
            config: &SurfaceConfig,
        ) -> Result<RenderSurfaceDescriptor, PlatformError> {
            tokio::time::sleep(self.delay).await;
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(self.failure.clone());
            }
            let (width, height) = self.resolved.unwrap_or((config.width, config.height));
            Ok(RenderSurfaceDescriptor {
                surface_id: format!("fake-{backend}"),
                width,
                height,
                color_format: config.color_format,
            })
        }
    }

    fn vulkan_selection() -> BackendSelection {
        BackendSelection::Fallback {
            backend: BackendId::Vulkan,
            parity: ParityMatrix::default(),
        }
    }

    #[tokio::test]
    async fn failed_selection_is_never_attempted() {
        let init = BackendInitializer::new(FakePlatform::immediate());
        let selection = BackendSelection::Failed {
            message: "Missing required features: COMPUTE".to_string(),
        };
        let err = init
            .initialize(&selection, &SurfaceConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendInitError::SelectionFailed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_platform_times_out() {
        let init = BackendInitializer::with_timeout(
            FakePlatform::with_delay(Duration::from_millis(6000)),
            Duration::from_millis(5000),
        );
        let err = init
            .initialize(&vulkan_selection(), &SurfaceConfig::default())
            .await
            .unwrap_err();
        match err {
            BackendInitError::Timeout { backend, budget_ms } => {
                assert_eq!(backend, BackendId::Vulkan);
                assert_eq!(budget_ms, 5000);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_device_loss_is_retried() {
        let platform = FakePlatform::failing(1, PlatformError::DeviceLost("gone".to_string()));
        let init = BackendInitializer::new(platform);
        let handle = init
            .initialize(&vulkan_selection(), &SurfaceConfig::default())
            .await
            .unwrap();
        assert_eq!(handle.backend, BackendId::Vulkan);
    }

    #[tokio::test]
    async fn second_device_loss_is_fatal() {
        let platform = FakePlatform::failing(2, PlatformError::DeviceLost("gone".to_string()));
        let init = BackendInitializer::new(platform);
        let err = init
            .initialize(&vulkan_selection(), &SurfaceConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendInitError::Platform {
                source: PlatformError::DeviceLost(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn non_device_loss_failure_is_not_retried() {
        let platform = FakePlatform::failing(
            1,
            PlatformError::SurfaceCreation("bad format".to_string()),
        );
        let init = BackendInitializer::new(platform);
        let err = init
            .initialize(&vulkan_selection(), &SurfaceConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendInitError::Platform {
                source: PlatformError::SurfaceCreation(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn handle_reflects_requested_dimensions() {
        let init = BackendInitializer::new(FakePlatform::immediate());
        let config = SurfaceConfig {
            width: 1920,
            height: 1080,
            ..SurfaceConfig::default()
        };
        let handle = init.initialize(&vulkan_selection(), &config).await.unwrap();
        assert_eq!(handle.width(), 1920);
        assert_eq!(handle.height(), 1080);
        assert_eq!(handle.surface.color_format, ColorFormat::Bgra8Unorm);
    }

    #[tokio::test]
    async fn clamped_dimensions_win_over_requested() {
        let mut platform = FakePlatform::immediate();
        platform.resolved = Some((4096, 4096));
        let init = BackendInitializer::new(platform);
        let config = SurfaceConfig {
            width: 16384,
            height: 16384,
            ..SurfaceConfig::default()
        };
        let handle = init.initialize(&vulkan_selection(), &config).await.unwrap();
        assert_eq!(handle.width(), 4096);
        assert_eq!(handle.height(), 4096);
    }
}
