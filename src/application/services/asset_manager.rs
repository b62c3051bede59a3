//! Asset management: preconnect hints, critical and per-page preloads, and
//! the loaded/failed bookkeeping image components consult before fetching.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use futures_util::future::join_all;
use parking_lot::Mutex;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::entities::{AssetCatalog, AssetStats, OptimizeOptions, PageKey};
use crate::domain::ports::{DocumentPort, FormatSupportPort, LinkHint};

use super::image_preloader::ImagePreloader;

static RASTER_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png)$").expect("static regex is valid"));

/// Invariant: a URL is never in both sets.
#[derive(Debug, Default)]
struct AssetState {
    loaded: HashSet<String>,
    failed: HashSet<String>,
}

impl AssetState {
    fn mark_loaded(&mut self, url: &str) {
        if !self.failed.contains(url) {
            self.loaded.insert(url.to_string());
        }
    }

    fn mark_failed(&mut self, url: &str) {
        self.loaded.remove(url);
        self.failed.insert(url.to_string());
    }
}

/// Orchestrates asset preloading for the application.
///
/// One instance lives for the whole application session and is shared by
/// every component through `Arc`.
pub struct AssetManager {
    preloader: Arc<ImagePreloader>,
    document: Arc<dyn DocumentPort>,
    formats: Arc<dyn FormatSupportPort>,
    catalog: AssetCatalog,
    state: Mutex<AssetState>,
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("catalog", &self.catalog)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl AssetManager {
    #[must_use]
    pub fn new(
        preloader: Arc<ImagePreloader>,
        document: Arc<dyn DocumentPort>,
        formats: Arc<dyn FormatSupportPort>,
        catalog: AssetCatalog,
    ) -> Self {
        Self {
            preloader,
            document,
            formats,
            catalog,
            state: Mutex::new(AssetState::default()),
        }
    }

    #[must_use]
    pub fn preloader(&self) -> &Arc<ImagePreloader> {
        &self.preloader
    }

    #[must_use]
    pub const fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Adds preconnect hints and preloads the critical assets.
    ///
    /// Meant to run once at startup. Never fails: preload errors are logged
    /// and the application continues without the asset.
    pub async fn initialize(&self) {
        self.preconnect_domains();
        self.preload_critical_assets().await;
        info!(
            loaded = self.state.lock().loaded.len(),
            "Asset manager initialized"
        );
    }

    fn preconnect_domains(&self) {
        for origin in &self.catalog.preconnect_origins {
            debug!(origin = %origin, "Adding preconnect hint");
            self.document.append_link(LinkHint::preconnect(origin.clone()));
        }
    }

    async fn preload_critical_assets(&self) {
        let assets = &self.catalog.critical_assets;
        if assets.is_empty() {
            return;
        }

        match self.preloader.preload_batch(assets.iter().cloned()).await {
            Ok(()) => self.record_loaded(assets),
            Err(e) => {
                warn!(error = %e, "Some critical assets failed to preload");
                self.record_completed(assets).await;
            }
        }
    }

    /// Prefetches the assets registered for `page`.
    ///
    /// Unknown pages and pages without assets are a no-op. Failures are
    /// logged and never reach the caller, so navigation is never blocked.
    pub async fn preload_page_assets(&self, page: &PageKey) {
        let assets = self.catalog.assets_for(page);
        if assets.is_empty() {
            debug!(page = %page, "No assets registered for page");
            return;
        }

        debug!(page = %page, count = assets.len(), "Preloading page assets");
        match self.preloader.preload_batch(assets.iter().cloned()).await {
            Ok(()) => self.record_loaded(assets),
            Err(e) => {
                warn!(page = %page, error = %e, "Failed to preload page assets");
                self.record_completed(assets).await;
            }
        }
    }

    fn record_loaded(&self, assets: &[String]) {
        let mut state = self.state.lock();
        for asset in assets {
            state.mark_loaded(asset);
        }
    }

    /// After a fail-fast batch, waits for the sibling fetches still in
    /// flight and keeps every URL that loaded.
    async fn record_completed(&self, assets: &[String]) {
        let outcomes = join_all(assets.iter().map(|asset| async move {
            let loaded = matches!(self.preloader.wait_settled(asset).await, Some(Ok(())));
            (asset, loaded)
        }))
        .await;

        let mut state = self.state.lock();
        for (asset, loaded) in outcomes {
            if loaded {
                state.mark_loaded(asset);
            }
        }
    }

    #[must_use]
    pub fn is_asset_loaded(&self, url: &str) -> bool {
        self.state.lock().loaded.contains(url)
    }

    #[must_use]
    pub fn is_asset_failed(&self, url: &str) -> bool {
        self.state.lock().failed.contains(url)
    }

    /// Records `url` as unloadable until the cache is cleared.
    pub fn mark_asset_failed(&self, url: &str) {
        debug!(url = %url, "Marking asset as failed");
        self.state.lock().mark_failed(url);
    }

    /// Rewrites the file extension to the requested modern format when the
    /// host can decode it.
    ///
    /// This is a hint: the sibling file may not exist, so callers must fall
    /// back to the original URL when the rewritten one fails to load.
    #[must_use]
    pub fn optimized_image_url(&self, url: &str, options: OptimizeOptions) -> String {
        let Some(format) = options.format.filter(|f| f.is_modern()) else {
            return url.to_string();
        };

        if !self.formats.supports(format) {
            return url.to_string();
        }

        RASTER_EXTENSION_RE
            .replace(url, format!(".{}", format.extension()))
            .into_owned()
    }

    #[must_use]
    pub fn stats(&self) -> AssetStats {
        let state = self.state.lock();
        let mut loaded_assets: Vec<String> = state.loaded.iter().cloned().collect();
        let mut failed_assets: Vec<String> = state.failed.iter().cloned().collect();
        loaded_assets.sort();
        failed_assets.sort();

        AssetStats {
            loaded: loaded_assets.len(),
            failed: failed_assets.len(),
            loaded_assets,
            failed_assets,
            preloader: self.preloader.stats(),
        }
    }

    /// Clears the loaded and failed sets and the preloader cache.
    pub fn clear_cache(&self) {
        {
            let mut state = self.state.lock();
            state.loaded.clear();
            state.failed.clear();
        }
        self.preloader.clear_cache();
        info!("Cleared asset caches");
    }
}
