//! Landmark detector capability.
//!
//! A [`Detector`] starts *unloaded*. [`Detector::load`] acquires the
//! underlying provider (model weights, a sidecar reader, ...) with a
//! bounded number of attempts, after which the detector is *loaded* and
//! [`Detector::detect`] may be called. Detection itself is never retried.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hairfit_core::{LandmarkProvider, LandmarkSet};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::provider::JsonLandmarkProvider;

/// Default number of load attempts.
pub const DEFAULT_LOAD_ATTEMPTS: u32 = 3;

const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Acquires a landmark provider.
pub trait DetectorLoader: Send + Sync {
    /// Provider produced by a successful load.
    type Provider: LandmarkProvider;

    /// Human-readable detector name, for logs.
    fn name(&self) -> &str;

    /// Attempts to load the provider once.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be loaded.
    fn load(&self) -> impl Future<Output = Result<Self::Provider>> + Send;
}

/// Loader for detectors that have already written JSON landmark documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DetectorLoader for DocumentLoader {
    type Provider = JsonLandmarkProvider;

    fn name(&self) -> &str {
        "landmark-documents"
    }

    async fn load(&self) -> Result<JsonLandmarkProvider> {
        Ok(JsonLandmarkProvider::new())
    }
}

/// Landmark detector with explicit unloaded and loaded states.
pub struct Detector<L: DetectorLoader> {
    loader: L,
    attempts: u32,
    provider: OnceCell<L::Provider>,
}

impl<L: DetectorLoader> Detector<L> {
    /// Creates an unloaded detector.
    ///
    /// `attempts` is clamped to at least one.
    #[must_use]
    pub fn new(loader: L, attempts: u32) -> Self {
        Self {
            loader,
            attempts: attempts.max(1),
            provider: OnceCell::new(),
        }
    }

    /// Returns true once [`Self::load`] has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.provider.initialized()
    }

    /// Loads the detector, retrying up to the configured number of attempts.
    ///
    /// Loading an already loaded detector is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the last load error once every attempt has failed.
    pub async fn load(&self) -> Result<()> {
        self.provider
            .get_or_try_init(|| self.load_with_retries())
            .await
            .map(|_| ())
    }

    async fn load_with_retries(&self) -> Result<L::Provider> {
        let name = self.loader.name();
        let mut attempt = 1;
        loop {
            debug!("Loading detector {name} (attempt {attempt}/{})", self.attempts);
            match self.loader.load().await {
                Ok(provider) => {
                    info!("Detector {name} loaded");
                    return Ok(provider);
                }
                Err(e) if attempt < self.attempts => {
                    warn!("Detector {name} failed to load (attempt {attempt}): {e:#}");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to load detector {name} after {attempt} attempt(s)")
                    });
                }
            }
        }
    }

    /// Detects faces in an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector is not loaded or detection fails.
    pub async fn detect(&self, image: &Path) -> Result<Vec<LandmarkSet>> {
        let Some(provider) = self.provider.get() else {
            bail!("Detector {} is not loaded", self.loader.name());
        };
        provider.detect(image).await
    }
}

impl<L: DetectorLoader> LandmarkProvider for Detector<L> {
    async fn detect(&self, image: &Path) -> Result<Vec<LandmarkSet>> {
        Self::detect(self, image).await
    }
}
