//! Image preloading with per-URL request coalescing.
//!
//! Concurrent callers asking for the same URL share one underlying fetch.
//! Successful URLs move to a loaded set and are never fetched again until
//! the cache is cleared. Failures are not remembered, so a later call retries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared, try_join_all};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

use crate::domain::entities::PreloaderStats;
use crate::domain::errors::{AssetError, AssetResult};
use crate::domain::ports::ImageFetchPort;

type PendingPreload = Shared<BoxFuture<'static, AssetResult<()>>>;

#[derive(Default)]
struct PreloadState {
    loaded: HashSet<String>,
    pending: HashMap<String, PendingPreload>,
    /// Bumped by `clear_cache` so fetches started before the clear cannot
    /// write back into the new cache.
    generation: u64,
}

/// Fetches images ahead of display.
pub struct ImagePreloader {
    fetcher: Arc<dyn ImageFetchPort>,
    state: Arc<Mutex<PreloadState>>,
}

impl std::fmt::Debug for ImagePreloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ImagePreloader")
            .field("loaded", &state.loaded.len())
            .field("pending", &state.pending.len())
            .finish_non_exhaustive()
    }
}

impl ImagePreloader {
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>) -> Self {
        Self {
            fetcher,
            state: Arc::new(Mutex::new(PreloadState::default())),
        }
    }

    /// Preloads a single image.
    ///
    /// Resolves immediately for URLs already loaded and joins the in-flight
    /// fetch when one exists for `url`.
    ///
    /// # Errors
    /// Returns the fetch error. The failure is not cached.
    pub async fn preload(&self, url: &str) -> AssetResult<()> {
        let pending = {
            let mut state = self.state.lock();
            if state.loaded.contains(url) {
                trace!(url = %url, "Image already preloaded");
                return Ok(());
            }

            if let Some(pending) = state.pending.get(url) {
                trace!(url = %url, "Joining in-flight preload");
                pending.clone()
            } else {
                let pending = self.start_fetch(url, state.generation);
                state.pending.insert(url.to_string(), pending.clone());
                pending
            }
        };

        pending.await
    }

    fn start_fetch(&self, url: &str, generation: u64) -> PendingPreload {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let url = url.to_string();

        debug!(url = %url, "Preloading image");

        let fetch = {
            let state = Arc::clone(&state);
            let url = url.clone();
            async move {
                let result = fetcher.fetch(&url).await;
                settle(&state, &url, generation, &result);
                result
            }
        };

        match Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(fetch);
                async move {
                    task.await.unwrap_or_else(|e| {
                        let result = Err(AssetError::preload_failed(
                            url.as_str(),
                            format!("Preload task failed: {e}"),
                        ));
                        settle(&state, &url, generation, &result);
                        result
                    })
                }
                .boxed()
                .shared()
            }
            Err(_) => {
                warn!(url = %url, "No Tokio runtime; preload only runs while awaited");
                fetch.boxed().shared()
            }
        }
    }

    /// Preloads every URL concurrently.
    ///
    /// # Errors
    /// Returns the first failure. Each fetch runs on its own task, so the
    /// ones still running keep going and populate the cache when they finish.
    pub async fn preload_batch<I, S>(&self, urls: I) -> AssetResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        try_join_all(urls.iter().map(|url| self.preload(url)))
            .await
            .map(|_| ())
    }

    /// Waits for an in-flight fetch of `url` without starting a new one.
    ///
    /// Returns `None` when `url` is neither loaded nor pending.
    pub async fn wait_settled(&self, url: &str) -> Option<AssetResult<()>> {
        let pending = {
            let state = self.state.lock();
            if state.loaded.contains(url) {
                return Some(Ok(()));
            }
            state.pending.get(url)?.clone()
        };
        Some(pending.await)
    }

    #[must_use]
    pub fn is_preloaded(&self, url: &str) -> bool {
        self.state.lock().loaded.contains(url)
    }

    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        self.state.lock().pending.contains_key(url)
    }

    /// Forgets every loaded and pending URL.
    pub fn clear_cache(&self) {
        let mut state = self.state.lock();
        state.loaded.clear();
        state.pending.clear();
        state.generation = state.generation.wrapping_add(1);
        debug!("Cleared image preload cache");
    }

    #[must_use]
    pub fn stats(&self) -> PreloaderStats {
        let state = self.state.lock();
        let mut preloaded_images: Vec<String> = state.loaded.iter().cloned().collect();
        preloaded_images.sort();
        PreloaderStats {
            preloaded_count: state.loaded.len(),
            pending_count: state.pending.len(),
            preloaded_images,
        }
    }
}

fn settle(state: &Mutex<PreloadState>, url: &str, generation: u64, result: &AssetResult<()>) {
    let mut state = state.lock();
    if state.generation == generation {
        state.pending.remove(url);
        if result.is_ok() {
            state.loaded.insert(url.to_string());
        }
    }
    drop(state);

    match result {
        Ok(()) => debug!(url = %url, "Image preloaded"),
        Err(e) => warn!(url = %url, error = %e, "Image preload failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockImageFetcher;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready, task};

    fn preloader(fetcher: &Arc<MockImageFetcher>) -> ImagePreloader {
        ImagePreloader::new(fetcher.clone())
    }

    /// Lets spawned fetch tasks run until they block.
    async fn run_spawned() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test]
    async fn test_preload_marks_url_loaded() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let preloader = preloader(&fetcher);

        preloader.preload("/images/download.png").await.unwrap();

        assert!(preloader.is_preloaded("/images/download.png"));
        assert!(!preloader.is_pending("/images/download.png"));
        assert_eq!(fetcher.calls("/images/download.png"), 1);
    }

    #[tokio::test]
    async fn test_loaded_url_is_not_fetched_again() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let preloader = preloader(&fetcher);

        preloader.preload("/images/a.png").await.unwrap();
        preloader.preload("/images/a.png").await.unwrap();

        assert_eq!(fetcher.calls("/images/a.png"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_preloads_share_one_fetch() {
        let fetcher = Arc::new(MockImageFetcher::gated());
        let preloader = preloader(&fetcher);

        let mut first = task::spawn(preloader.preload("/images/a.png"));
        let mut second = task::spawn(preloader.preload("/images/a.png"));

        assert_pending!(first.poll());
        assert_pending!(second.poll());
        run_spawned().await;
        assert!(preloader.is_pending("/images/a.png"));
        assert_eq!(fetcher.calls("/images/a.png"), 1);

        fetcher.open();
        run_spawned().await;

        assert!(first.is_woken() || second.is_woken());
        let first_result = assert_ready!(first.poll());
        let second_result = assert_ready!(second.poll());

        assert!(first_result.is_ok());
        assert!(second_result.is_ok());
        assert_eq!(fetcher.total_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_failures_are_shared() {
        let fetcher = Arc::new(MockImageFetcher::gated());
        fetcher.fail("/images/missing.png");
        let preloader = preloader(&fetcher);

        let mut first = task::spawn(preloader.preload("/images/missing.png"));
        let mut second = task::spawn(preloader.preload("/images/missing.png"));
        assert_pending!(first.poll());
        assert_pending!(second.poll());

        fetcher.open();
        run_spawned().await;

        let first_result = assert_ready!(first.poll());
        let second_result = assert_ready!(second.poll());
        assert_eq!(first_result, second_result);
        assert!(first_result.is_err());
        assert_eq!(fetcher.calls("/images/missing.png"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_waiter_does_not_stall_fetch() {
        let fetcher = Arc::new(MockImageFetcher::gated());
        let preloader = preloader(&fetcher);

        let mut waiter = task::spawn(preloader.preload("/images/a.png"));
        assert_pending!(waiter.poll());
        drop(waiter);

        fetcher.open();
        run_spawned().await;

        assert!(preloader.is_preloaded("/images/a.png"));
        assert_eq!(preloader.stats().pending_count, 0);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let fetcher = Arc::new(MockImageFetcher::failing(&["/images/flaky.png"]));
        let preloader = preloader(&fetcher);

        let err = preloader.preload("/images/flaky.png").await.unwrap_err();
        assert_eq!(err.url(), "/images/flaky.png");
        assert!(!preloader.is_preloaded("/images/flaky.png"));
        assert!(!preloader.is_pending("/images/flaky.png"));

        fetcher.recover("/images/flaky.png");
        preloader.preload("/images/flaky.png").await.unwrap();

        assert!(preloader.is_preloaded("/images/flaky.png"));
        assert_eq!(fetcher.calls("/images/flaky.png"), 2);
    }

    #[tokio::test]
    async fn test_batch_succeeds_when_all_succeed() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let preloader = preloader(&fetcher);

        preloader
            .preload_batch(["/images/a.png", "/images/b.png", "/images/c.png"])
            .await
            .unwrap();

        assert_eq!(preloader.stats().preloaded_count, 3);
    }

    #[tokio::test]
    async fn test_batch_fails_on_any_failure() {
        let fetcher = Arc::new(MockImageFetcher::failing(&["/images/b.png"]));
        let preloader = preloader(&fetcher);

        let err = preloader
            .preload_batch(["/images/a.png", "/images/b.png"])
            .await
            .unwrap_err();

        assert_eq!(err.url(), "/images/b.png");
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_failure_leaves_slower_siblings_running() {
        let fetcher = Arc::new(MockImageFetcher::failing(&["/images/bad.png"]));
        fetcher.delay("/images/slow.png", Duration::from_millis(50));
        let preloader = preloader(&fetcher);

        let err = preloader
            .preload_batch(["/images/slow.png", "/images/bad.png"])
            .await
            .unwrap_err();
        assert_eq!(err.url(), "/images/bad.png");
        assert!(preloader.is_pending("/images/slow.png"));

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(preloader.is_preloaded("/images/slow.png"));
        assert_eq!(preloader.stats().pending_count, 0);
        assert_eq!(fetcher.calls("/images/slow.png"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_settled_joins_in_flight_fetch_only() {
        let fetcher = Arc::new(MockImageFetcher::new());
        fetcher.delay("/images/a.png", Duration::from_millis(20));
        let preloader = Arc::new(preloader(&fetcher));

        assert!(preloader.wait_settled("/images/a.png").await.is_none());
        assert_eq!(fetcher.total_calls(), 0);

        let background = Arc::clone(&preloader);
        let fetch = tokio::spawn(async move { background.preload("/images/a.png").await });
        run_spawned().await;

        assert_eq!(preloader.wait_settled("/images/a.png").await, Some(Ok(())));
        assert!(fetch.await.unwrap().is_ok());
        assert_eq!(fetcher.calls("/images/a.png"), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_forgets_loaded_urls() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let preloader = preloader(&fetcher);

        preloader.preload("/images/a.png").await.unwrap();
        preloader.clear_cache();

        assert!(!preloader.is_preloaded("/images/a.png"));

        preloader.preload("/images/a.png").await.unwrap();
        assert_eq!(fetcher.calls("/images/a.png"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_started_before_clear_does_not_repopulate() {
        let fetcher = Arc::new(MockImageFetcher::gated());
        let preloader = preloader(&fetcher);

        let mut stale = task::spawn(preloader.preload("/images/a.png"));
        assert_pending!(stale.poll());

        preloader.clear_cache();
        assert_eq!(preloader.stats().pending_count, 0);

        fetcher.open();
        run_spawned().await;
        assert!(assert_ready!(stale.poll()).is_ok());
        assert!(!preloader.is_preloaded("/images/a.png"));
    }

    #[tokio::test]
    async fn test_stats_lists_sorted_urls() {
        let fetcher = Arc::new(MockImageFetcher::new());
        let preloader = preloader(&fetcher);

        preloader.preload("/images/b.png").await.unwrap();
        preloader.preload("/images/a.png").await.unwrap();

        let stats = preloader.stats();
        assert_eq!(stats.preloaded_count, 2);
        assert_eq!(stats.pending_count, 0);
        assert_eq!(stats.preloaded_images, vec!["/images/a.png", "/images/b.png"]);
    }
}
