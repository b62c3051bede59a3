//! Application composition root.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::dto::PortfolioContent;
use crate::application::services::{
    AssetManager, ImageOptimizer, ImagePreloader, PageAssets, ToastQueue,
};
use crate::application::use_cases::{LoadContentUseCase, SendContactUseCase};
use crate::domain::entities::{AssetStats, ContactForm, Toast, ToastId};
use crate::domain::errors::ContactError;
use crate::domain::ports::{
    ContactPort, ContentPort, DocumentPort, FormatSupportPort, ImageFetchPort, VisibilityPort,
};
use crate::infrastructure::config::AppConfig;

use super::widgets::{LazyImage, LazyImageProps, OptimizedImage, ToastStack};

/// Adapters the application runs on.
pub struct Ports {
    pub fetcher: Arc<dyn ImageFetchPort>,
    pub document: Arc<dyn DocumentPort>,
    pub formats: Arc<dyn FormatSupportPort>,
    pub visibility: Arc<dyn VisibilityPort>,
    pub content: Arc<dyn ContentPort>,
    pub contact: Arc<dyn ContactPort>,
}

/// Snapshot of everything worth reporting about a running session.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub current_path: Option<String>,
    pub assets: AssetStats,
    pub toasts: Vec<Toast>,
    /// Toasts with no expiry timer, which stay until dismissed.
    pub unexpiring_toasts: Vec<ToastId>,
}

/// One instance per running application. Components receive the services
/// they need from here instead of reaching for globals.
pub struct AppContext {
    assets: Arc<AssetManager>,
    page_assets: PageAssets,
    optimizer: ImageOptimizer,
    toasts: ToastQueue,
    content: LoadContentUseCase,
    contact: SendContactUseCase,
    visibility: Arc<dyn VisibilityPort>,
    fallback_src: String,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("assets", &self.assets)
            .field("page_assets", &self.page_assets)
            .field("toasts", &self.toasts)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    #[must_use]
    pub fn new(config: &AppConfig, ports: Ports) -> Self {
        let preloader = Arc::new(ImagePreloader::new(ports.fetcher));
        let assets = Arc::new(AssetManager::new(
            preloader,
            ports.document,
            ports.formats,
            config.assets.catalog(),
        ));
        let toasts = ToastQueue::new(config.toasts.default_duration());

        Self {
            page_assets: PageAssets::new(Arc::clone(&assets), config.assets.routes.clone()),
            optimizer: ImageOptimizer::new(Arc::clone(&assets)),
            content: LoadContentUseCase::new(ports.content, toasts.clone()),
            contact: SendContactUseCase::new(
                ports.contact,
                toasts.clone(),
                config.contact.direct_email.clone(),
            ),
            assets,
            toasts,
            visibility: ports.visibility,
            fallback_src: config.assets.fallback_src.clone(),
        }
    }

    #[must_use]
    pub const fn assets(&self) -> &Arc<AssetManager> {
        &self.assets
    }

    #[must_use]
    pub const fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    #[must_use]
    pub const fn page_assets(&self) -> &PageAssets {
        &self.page_assets
    }

    /// Startup: preconnect hints and critical preloads.
    pub async fn start(&self) {
        info!("Starting asset pipeline");
        self.assets.initialize().await;
    }

    /// Records a navigation. See [`PageAssets::on_route_change`].
    pub fn navigate(&self, path: &str) -> Option<JoinHandle<()>> {
        self.page_assets.on_route_change(path)
    }

    /// A lazy image wired to the configured fallback.
    #[must_use]
    pub fn lazy_image(&self, props: LazyImageProps) -> LazyImage {
        let props = if props.fallback_src.as_deref() == Some(super::widgets::DEFAULT_FALLBACK_SRC) {
            props.fallback(Some(self.fallback_src.clone()))
        } else {
            props
        };
        LazyImage::new(props)
    }

    /// Mounts `image`, waits for it to become visible and loads it.
    pub async fn load_lazy_image(&self, image: &mut LazyImage) {
        image
            .run(self.visibility.as_ref(), self.assets.preloader())
            .await;
    }

    /// An optimized image wired to the configured fallback.
    #[must_use]
    pub fn optimized_image(&self, src: &str, alt: &str) -> OptimizedImage {
        OptimizedImage::new(src, alt).fallback(self.fallback_src.clone())
    }

    pub async fn load_optimized_image(&self, image: &mut OptimizedImage) {
        image.load(&self.optimizer).await;
    }

    #[must_use]
    pub fn toast_stack(&self) -> ToastStack {
        ToastStack::new(self.toasts.clone())
    }

    /// Loads the content pages' data. Never fails; see [`LoadContentUseCase`].
    pub async fn load_content(&self) -> PortfolioContent {
        self.content.execute().await
    }

    /// Submits the contact form. See [`SendContactUseCase::execute`].
    ///
    /// # Errors
    /// Returns the validation or delivery error; a toast is shown either way.
    pub async fn send_contact(&self, form: &ContactForm) -> Result<(), ContactError> {
        self.contact.execute(form).await
    }

    #[must_use]
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            current_path: self.page_assets.current_path(),
            assets: self.assets.stats(),
            toasts: self.toasts.toasts(),
            unexpiring_toasts: self.toasts.unexpiring(),
        }
    }
}
