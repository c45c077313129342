//! LauncherController: background work for the launcher UI
//!
//! Dependency injection through `CatalogSource` and `DesktopIntegration`,
//! `Arc<RwLock<>>` catalog snapshot, tokio tasks reporting back over the
//! event channel.

use super::install::{InstallCapability, XdgDesktopEntry};
use super::threading::{spawn_monitored_task, AsyncBridge};
use super::DesktopIntegration;
use crate::catalog::{resolve_url, CatalogSource, HttpCatalogSource};
use crate::config::LauncherSettings;
use crate::error::{AppError, CatalogLoadError, ClassificationError};
use crate::models::{Catalog, LoadStatus};
use crate::theme::brightness::{classify_image, classify_source, fetch_image_bytes};
use crate::theme::{Classification, ClassificationRequest};
use eframe::egui;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;

/// Discrete results delivered from background tasks to the UI loop
#[derive(Debug, Clone)]
pub enum LauncherEvent {
    /// The catalog snapshot changed (success or failure of load `request`)
    CatalogUpdated { request: u64 },
    /// Decoded background image, or why there is none
    BackgroundLoaded(Result<Arc<BackgroundImage>, ClassificationError>),
    /// Classification for request `token` finished
    Classified { token: u64, classification: Classification },
    /// Desktop entry installation finished
    InstallFinished(Result<PathBuf, AppError>),
}

/// Background decoded off the UI thread, classified from the same decode
#[derive(Clone)]
pub struct BackgroundImage {
    pub image: egui::ColorImage,
    pub classification: Classification,
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("size", &self.image.size)
            .field("classification", &self.classification)
            .finish()
    }
}

/// Decode encoded background bytes once into a texture-ready image and its
/// classification. A classification failure resolves to dark.
pub fn decode_background(bytes: &[u8]) -> Result<BackgroundImage, ClassificationError> {
    if bytes.is_empty() {
        return Err(ClassificationError::EmptySource);
    }
    let img = image::load_from_memory(bytes).map_err(|e| ClassificationError::Decode(e.to_string()))?;
    let classification = classify_image(&img).unwrap_or_else(|e| {
        log::debug!("[Theme] Background classification failed, using dark: {}", e);
        Classification::dark()
    });

    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(BackgroundImage { image, classification })
}

/// Catalog plus the status of the most recent load.
///
/// The catalog is replaced wholesale on success and left untouched on
/// failure.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub status: LoadStatus,
    pub catalog: Arc<Catalog>,
    /// Id of the load whose outcome `status` reflects
    pub request: u64,
}

impl CatalogSnapshot {
    /// Mark load `request` as in flight
    pub fn begin(&mut self, request: u64) {
        self.request = request;
        self.status = LoadStatus::Loading;
    }

    /// Apply the outcome of load `request`; older loads are ignored
    pub fn apply(&mut self, request: u64, result: Result<Catalog, CatalogLoadError>) -> bool {
        if request < self.request {
            log::debug!("[Catalog] Ignoring superseded load #{} (latest #{})", request, self.request);
            return false;
        }
        self.request = request;

        match result {
            Ok(catalog) => {
                log::info!(
                    "[Catalog] Loaded {} categories, {} apps",
                    catalog.categories.len(),
                    catalog.apps.len()
                );
                self.catalog = Arc::new(catalog);
                self.status = LoadStatus::Success;
            }
            Err(e) => {
                log::error!("[Catalog] Load failed: {}", e);
                self.status = LoadStatus::Error {
                    message: AppError::Catalog(e.clone()).user_message(),
                    status: e.status(),
                };
            }
        }
        true
    }
}

/// Owns the catalog snapshot and runs every asynchronous job for the UI
pub struct LauncherController {
    pub settings: LauncherSettings,
    catalog_source: Arc<dyn CatalogSource>,
    desktop: Arc<dyn DesktopIntegration>,
    http: reqwest::Client,
    bridge: AsyncBridge,
    handle: Handle,
    snapshot: Arc<RwLock<CatalogSnapshot>>,
    next_request: AtomicU64,
}

impl LauncherController {
    /// Build a controller from explicit dependencies
    pub fn new(
        settings: LauncherSettings,
        catalog_source: Arc<dyn CatalogSource>,
        desktop: Arc<dyn DesktopIntegration>,
        bridge: AsyncBridge,
        handle: Handle,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[Controller] Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        LauncherController {
            settings,
            catalog_source,
            desktop,
            http,
            bridge,
            handle,
            snapshot: Arc::new(RwLock::new(CatalogSnapshot::default())),
            next_request: AtomicU64::new(0),
        }
    }

    /// Controller wired to the HTTP catalog and the XDG desktop entry
    pub fn new_production(
        settings: LauncherSettings,
        bridge: AsyncBridge,
        handle: Handle,
    ) -> Result<Self, CatalogLoadError> {
        let source = HttpCatalogSource::new(settings.catalog_endpoint.clone(), settings.request_timeout())?;
        log::info!("[Controller] Catalog endpoint: {}", source.endpoint());
        Ok(Self::new(
            settings,
            Arc::new(source),
            Arc::new(XdgDesktopEntry::for_current_user()),
            bridge,
            handle,
        ))
    }

    pub fn set_ui_context(&self, ctx: &egui::Context) {
        self.bridge.set_ui_context(ctx);
    }

    /// Cheap copy of the current snapshot
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Resolve a possibly relative backend URL
    pub fn backend_url(&self, url: &str) -> String {
        resolve_url(&self.settings.backend_base_url, url)
    }

    fn begin_catalog_request(&self) -> u64 {
        let request = self.next_request.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut snapshot) = self.snapshot.write() {
            snapshot.begin(request);
        }
        log::info!("[Catalog] Load #{} started", request);
        request
    }

    /// Start a catalog load in the background; returns its request id
    pub fn request_catalog(&self) -> u64 {
        let request = self.begin_catalog_request();
        let source = self.catalog_source.clone();
        let snapshot = self.snapshot.clone();

        spawn_monitored_task(&self.handle, "catalog_load", self.bridge.clone(), move |bridge| async move {
            run_catalog_load(source, snapshot, request).await;
            bridge.send(LauncherEvent::CatalogUpdated { request }).await;
            Ok(())
        });
        request
    }

    /// Run a catalog load to completion on the caller's task
    pub async fn load_catalog(&self) -> CatalogSnapshot {
        let request = self.begin_catalog_request();
        run_catalog_load(self.catalog_source.clone(), self.snapshot.clone(), request).await;
        self.snapshot()
    }

    /// Fetch and decode the configured background image
    pub fn request_background(&self) {
        let url = self.settings.background_image_url();
        let http = self.http.clone();

        spawn_monitored_task(&self.handle, "background_image", self.bridge.clone(), move |bridge| async move {
            let result = match fetch_image_bytes(&http, &url).await {
                Ok(bytes) => tokio::task::spawn_blocking(move || decode_background(&bytes))
                    .await
                    .map_err(|e| ClassificationError::Decode(e.to_string()))
                    .and_then(|r| r)
                    .map(Arc::new),
                Err(e) => Err(e),
            };
            match &result {
                Ok(background) => log::info!(
                    "[Theme] Background image loaded ({}x{})",
                    background.image.size[0],
                    background.image.size[1]
                ),
                Err(e) => log::error!("[Theme] Background image unavailable: {}", e),
            }
            bridge.send(LauncherEvent::BackgroundLoaded(result)).await;
            Ok(())
        });
    }

    /// Classify a background source that has no cached classification
    pub fn request_classification(&self, request: ClassificationRequest) {
        let http = self.http.clone();

        spawn_monitored_task(&self.handle, "classification", self.bridge.clone(), move |bridge| async move {
            let classification = classify_source(&http, &request.source).await;
            bridge
                .send(LauncherEvent::Classified {
                    token: request.token,
                    classification,
                })
                .await;
            Ok(())
        });
    }

    pub fn install_capability(&self) -> InstallCapability {
        self.desktop.capability()
    }

    /// Write the desktop entry in the background
    pub fn request_install(&self) {
        let desktop = self.desktop.clone();

        spawn_monitored_task(&self.handle, "desktop_install", self.bridge.clone(), move |bridge| async move {
            let result = tokio::task::spawn_blocking(move || desktop.install())
                .await
                .map_err(|e| AppError::Install(e.to_string()))
                .and_then(|r| r);
            let failure = result.as_ref().err().cloned();
            bridge.send(LauncherEvent::InstallFinished(result)).await;
            failure.map_or(Ok(()), Err)
        });
    }
}

async fn run_catalog_load(
    source: Arc<dyn CatalogSource>,
    snapshot: Arc<RwLock<CatalogSnapshot>>,
    request: u64,
) {
    let result = source.fetch().await;
    match snapshot.write() {
        Ok(mut guard) => {
            guard.apply(request, result);
        }
        Err(_) => log::error!("[Catalog] Snapshot lock poisoned; load #{} dropped", request),
    }
}
