//! Port definition for fetching images.

use async_trait::async_trait;

use crate::domain::errors::AssetResult;

/// Port for loading an image the way the host would before displaying it.
/// Implementations must be thread-safe.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the image at `url` and resolves once it is displayable.
    async fn fetch(&self, url: &str) -> AssetResult<()>;
}

#[cfg(test)]
#[allow(dead_code)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    use parking_lot::Mutex;
    use tokio::sync::Semaphore;

    use crate::domain::errors::AssetError;

    /// Mock fetcher that counts requests per URL.
    ///
    /// URLs registered with `fail` resolve to an error. A gated fetcher holds
    /// every request until `open` is called. URLs registered with `delay`
    /// sleep before settling.
    pub struct MockImageFetcher {
        calls: Mutex<HashMap<String, usize>>,
        failing: Mutex<HashSet<String>>,
        delays: Mutex<HashMap<String, Duration>>,
        gate: Semaphore,
    }

    impl MockImageFetcher {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(HashMap::new()),
                failing: Mutex::new(HashSet::new()),
                delays: Mutex::new(HashMap::new()),
                gate: Semaphore::new(Semaphore::MAX_PERMITS),
            }
        }

        pub fn gated() -> Self {
            Self {
                gate: Semaphore::new(0),
                ..Self::new()
            }
        }

        pub fn failing(urls: &[&str]) -> Self {
            let fetcher = Self::new();
            for url in urls {
                fetcher.fail(url);
            }
            fetcher
        }

        pub fn fail(&self, url: &str) {
            self.failing.lock().insert(url.to_string());
        }

        pub fn delay(&self, url: &str, delay: Duration) {
            self.delays.lock().insert(url.to_string(), delay);
        }

        pub fn recover(&self, url: &str) {
            self.failing.lock().remove(url);
        }

        pub fn open(&self) {
            self.gate.add_permits(1);
        }

        pub fn calls(&self, url: &str) -> usize {
            self.calls.lock().get(url).copied().unwrap_or(0)
        }

        pub fn total_calls(&self) -> usize {
            self.calls.lock().values().sum()
        }
    }

    impl Default for MockImageFetcher {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> AssetResult<()> {
            *self.calls.lock().entry(url.to_string()).or_insert(0) += 1;

            let _permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| AssetError::network(url, e.to_string()))?;

            let delay = self.delays.lock().get(url).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if self.failing.lock().contains(url) {
                return Err(AssetError::preload_failed(url, "HTTP 404"));
            }
            Ok(())
        }
    }
}
