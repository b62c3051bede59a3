//! Route-driven prefetching.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::entities::{AssetStats, PageKey};

use super::asset_manager::AssetManager;

/// Route paths and the page whose assets they prefetch.
#[must_use]
pub fn default_routes() -> BTreeMap<String, PageKey> {
    [
        ("/", "home"),
        ("/about", "about"),
        ("/projects", "projects"),
        ("/skills", "skills"),
        ("/contact", "contact"),
        ("/achievements", "achievements"),
    ]
    .into_iter()
    .map(|(path, page)| (path.to_string(), PageKey::new(page)))
    .collect()
}

/// Fires the asset manager's per-page preload whenever the current route
/// changes.
///
/// Preloads are detached: leaving a page does not cancel its prefetch.
pub struct PageAssets {
    manager: Arc<AssetManager>,
    routes: BTreeMap<String, PageKey>,
    current_path: Mutex<Option<String>>,
}

impl std::fmt::Debug for PageAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAssets")
            .field("routes", &self.routes)
            .field("current_path", &*self.current_path.lock())
            .finish_non_exhaustive()
    }
}

impl PageAssets {
    #[must_use]
    pub fn new(manager: Arc<AssetManager>, routes: BTreeMap<String, PageKey>) -> Self {
        Self {
            manager,
            routes,
            current_path: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn page_for_route(&self, path: &str) -> Option<&PageKey> {
        self.routes.get(path)
    }

    #[must_use]
    pub fn current_path(&self) -> Option<String> {
        self.current_path.lock().clone()
    }

    /// Records a navigation to `path`.
    ///
    /// Returns the handle of the spawned prefetch, or `None` when the path did
    /// not change, is not a known route, or no runtime is available.
    pub fn on_route_change(&self, path: &str) -> Option<JoinHandle<()>> {
        {
            let mut current = self.current_path.lock();
            if current.as_deref() == Some(path) {
                return None;
            }
            *current = Some(path.to_string());
        }

        let Some(page) = self.page_for_route(path).cloned() else {
            debug!(path = %path, "Route has no page assets");
            return None;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(path = %path, "No runtime available, skipping page preload");
            return None;
        };

        debug!(path = %path, page = %page, "Route changed, preloading page assets");
        let manager = Arc::clone(&self.manager);
        Some(handle.spawn(async move {
            manager.preload_page_assets(&page).await;
        }))
    }

    /// Preloads the assets of `page` and waits for the batch to settle.
    pub async fn preload_page_assets(&self, page: &PageKey) {
        self.manager.preload_page_assets(page).await;
    }

    #[must_use]
    pub fn asset_stats(&self) -> AssetStats {
        self.manager.stats()
    }
}
