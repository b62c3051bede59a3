//! Lazily loaded image with a fallback chain.

use tracing::{debug, trace};

use crate::application::services::ImagePreloader;
use crate::domain::errors::AssetResult;
use crate::domain::ports::{Rect, VisibilityOptions, VisibilityPort, VisibilitySubscription};
use crate::domain::services::{PlaceholderGenerator, PlaceholderOptions, escape_markup};

/// Image shown when the requested one cannot be loaded.
pub const DEFAULT_FALLBACK_SRC: &str = "/images/placeholder.svg";

type Callback = Box<dyn FnOnce() + Send>;

/// Where an image is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Showing the placeholder, waiting to become visible.
    Idle,
    /// Visible, fetch not started yet.
    InView,
    /// Fetching the source.
    Loading(String),
    /// Source displayed.
    Loaded,
    /// Source failed, fetching the fallback.
    FallbackLoading(String),
    /// Fallback displayed.
    FallbackLoaded,
    /// Nothing could be displayed.
    Error,
}

impl LoadPhase {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded | Self::FallbackLoaded | Self::Error)
    }

    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        matches!(self, Self::Loaded | Self::FallbackLoaded)
    }
}

/// Observable rendering state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImageState {
    pub current_src: String,
    pub is_loaded: bool,
    pub has_error: bool,
    pub is_in_view: bool,
}

/// Properties of a lazy image.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyImageProps {
    pub src: String,
    pub alt: String,
    pub class_name: String,
    pub fallback_src: Option<String>,
    pub placeholder: String,
    pub priority: bool,
    /// Position of the element in the document, for visibility tracking.
    pub bounds: Rect,
}

impl LazyImageProps {
    #[must_use]
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            class_name: String::new(),
            fallback_src: Some(DEFAULT_FALLBACK_SRC.to_string()),
            placeholder: PlaceholderGenerator::plain(&PlaceholderOptions::default()),
            priority: false,
            bounds: Rect::new(0.0, 0.0, 320.0, 240.0),
        }
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback_src: Option<String>) -> Self {
        self.fallback_src = fallback_src;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fallback worth trying: configured and different from `src`.
    fn distinct_fallback(&self) -> Option<&str> {
        self.fallback_src
            .as_deref()
            .filter(|fallback| *fallback != self.src)
    }
}

/// An image that waits until it is about to scroll into view before
/// fetching, and degrades to a fallback or an error block.
///
/// Dropping the image drops its visibility subscription, which disconnects
/// the observer.
pub struct LazyImage {
    props: LazyImageProps,
    phase: LoadPhase,
    state: LazyImageState,
    subscription: Option<VisibilitySubscription>,
    on_load: Option<Callback>,
    on_error: Option<Callback>,
}

impl std::fmt::Debug for LazyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImage")
            .field("src", &self.props.src)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("observing", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl LazyImage {
    #[must_use]
    pub fn new(props: LazyImageProps) -> Self {
        let state = LazyImageState {
            current_src: props.placeholder.clone(),
            is_loaded: false,
            has_error: false,
            is_in_view: false,
        };
        Self {
            props,
            phase: LoadPhase::Idle,
            state,
            subscription: None,
            on_load: None,
            on_error: None,
        }
    }

    /// Called once when the source image is displayed.
    #[must_use]
    pub fn on_load(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Called once when neither the source nor the fallback loads.
    #[must_use]
    pub fn on_error(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub const fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    #[must_use]
    pub const fn state(&self) -> &LazyImageState {
        &self.state
    }

    #[must_use]
    pub const fn props(&self) -> &LazyImageProps {
        &self.props
    }

    /// Attaches the image to the page.
    ///
    /// Priority images go straight to `Loading`. Others start observing
    /// their bounds and stay `Idle` until they become visible.
    pub fn mount(&mut self, visibility: &dyn VisibilityPort) {
        if self.phase != LoadPhase::Idle || self.subscription.is_some() {
            return;
        }

        if self.props.priority {
            self.state.is_in_view = true;
            self.phase = LoadPhase::Loading(self.props.src.clone());
            debug!(src = %self.props.src, "Priority image, loading immediately");
            return;
        }

        self.subscription = Some(visibility.observe(self.props.bounds, VisibilityOptions::default()));
    }

    /// Checks the visibility signal without waiting. Returns true if the
    /// image just entered view.
    pub fn poll_visibility(&mut self) -> bool {
        let crossed = self
            .subscription
            .as_mut()
            .is_some_and(VisibilitySubscription::try_crossed);
        if crossed {
            self.subscription = None;
            self.enter_view();
        }
        crossed
    }

    /// Waits for the image to become visible. Returns false if the observer
    /// went away first or the image was never mounted.
    pub async fn wait_for_visibility(&mut self) -> bool {
        if self.phase != LoadPhase::Idle {
            return self.state.is_in_view;
        }

        let Some(subscription) = self.subscription.take() else {
            return false;
        };

        if subscription.crossed().await {
            self.enter_view();
            true
        } else {
            false
        }
    }

    fn enter_view(&mut self) {
        if self.phase == LoadPhase::Idle {
            trace!(src = %self.props.src, "Image entered view");
            self.state.is_in_view = true;
            self.phase = LoadPhase::InView;
        }
    }

    /// URL that should be fetched next, advancing `InView` to `Loading`.
    pub fn next_fetch(&mut self) -> Option<String> {
        if self.phase == LoadPhase::InView {
            self.phase = LoadPhase::Loading(self.props.src.clone());
        }
        match &self.phase {
            LoadPhase::Loading(url) | LoadPhase::FallbackLoading(url) => Some(url.clone()),
            _ => None,
        }
    }

    /// Applies the outcome of fetching the current URL.
    pub fn apply_result(&mut self, result: AssetResult<()>) {
        match (self.phase.clone(), result) {
            (LoadPhase::Loading(_), Ok(())) => {
                self.state.current_src.clone_from(&self.props.src);
                self.state.is_loaded = true;
                self.state.has_error = false;
                self.phase = LoadPhase::Loaded;
                if let Some(callback) = self.on_load.take() {
                    callback();
                }
            }
            (LoadPhase::Loading(_), Err(e)) => {
                if let Some(fallback) = self.props.distinct_fallback() {
                    debug!(src = %self.props.src, fallback = %fallback, error = %e, "Image failed, trying fallback");
                    self.phase = LoadPhase::FallbackLoading(fallback.to_string());
                } else {
                    debug!(src = %self.props.src, error = %e, "Image failed");
                    self.fail();
                }
            }
            (LoadPhase::FallbackLoading(fallback), Ok(())) => {
                self.state.current_src = fallback;
                self.state.is_loaded = true;
                self.state.has_error = false;
                self.phase = LoadPhase::FallbackLoaded;
            }
            (LoadPhase::FallbackLoading(fallback), Err(e)) => {
                debug!(fallback = %fallback, error = %e, "Fallback image failed");
                self.fail();
            }
            (phase, _) => {
                trace!(phase = ?phase, "Ignoring load result outside a loading phase");
            }
        }
    }

    fn fail(&mut self) {
        self.state.has_error = true;
        self.phase = LoadPhase::Error;
        if let Some(callback) = self.on_error.take() {
            callback();
        }
    }

    /// Fetches through the preloader until a terminal phase is reached.
    /// Does nothing while the image is still `Idle`.
    pub async fn load(&mut self, preloader: &ImagePreloader) {
        while let Some(url) = self.next_fetch() {
            let result = preloader.preload(&url).await;
            self.apply_result(result);
        }
    }

    /// Mounts, waits for visibility unless prioritized, and loads.
    pub async fn run(&mut self, visibility: &dyn VisibilityPort, preloader: &ImagePreloader) {
        self.mount(visibility);
        if self.phase == LoadPhase::Idle && !self.wait_for_visibility().await {
            return;
        }
        self.load(preloader).await;
    }

    /// Renders the current state as HTML.
    #[must_use]
    pub fn render(&self) -> String {
        if self.phase == LoadPhase::Error {
            return render_unavailable(&self.props.class_name);
        }
        render_img(
            &self.state.current_src,
            &self.props.alt,
            &self.props.class_name,
            self.phase.is_displayed(),
            self.props.priority,
        )
    }
}

pub(crate) fn render_unavailable(class_name: &str) -> String {
    format!(
        concat!(
            r#"<div class="{}">"#,
            r#"<div class="text-center">"#,
            r#"<div class="text-2xl mb-2">📷</div>"#,
            r#"<div class="text-sm">Image not available</div>"#,
            "</div></div>"
        ),
        classes(&["flex items-center justify-center bg-gray-800 text-gray-400", class_name])
    )
}

pub(crate) fn render_img(src: &str, alt: &str, class_name: &str, loaded: bool, priority: bool) -> String {
    let opacity = if loaded { "opacity-100" } else { "opacity-70" };
    format!(
        r#"<img src="{}" alt="{}" class="{}" loading="{}">"#,
        escape_markup(src),
        escape_markup(alt),
        classes(&["transition-opacity duration-300", opacity, class_name]),
        if priority { "eager" } else { "lazy" }
    )
}

pub(crate) fn classes(parts: &[&str]) -> String {
    escape_markup(
        &parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    )
}
