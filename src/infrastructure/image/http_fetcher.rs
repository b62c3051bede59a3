//! HTTP adapter for image fetching.
//!
//! An image counts as loaded once the response is successful and its header
//! parses as an image, which is what the browser checks before firing `load`.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::Url;
use tracing::{debug, trace};

use crate::domain::errors::{AssetError, AssetResult};
use crate::domain::ports::ImageFetchPort;

/// Configuration for the HTTP image fetcher.
#[derive(Debug, Clone)]
pub struct HttpImageFetcherConfig {
    /// Origin relative paths are resolved against.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent header.
    pub user_agent: String,
}

impl Default for HttpImageFetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Fetches images over HTTP and checks that they decode.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpImageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageFetcher")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpImageFetcher {
    /// Creates a fetcher.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn new(config: &HttpImageFetcherConfig) -> AssetResult<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| AssetError::invalid_url(&config.base_url))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AssetError::network(&config.base_url, format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, base_url })
    }

    /// Resolves `url` against the base URL. Absolute URLs pass through.
    ///
    /// # Errors
    /// Returns error if the result is not a valid URL.
    pub fn resolve_url(&self, url: &str) -> AssetResult<Url> {
        self.base_url
            .join(url)
            .map_err(|_| AssetError::invalid_url(url))
    }

    async fn download(&self, url: &str, resolved: Url) -> AssetResult<(Bytes, Option<String>)> {
        let response = self
            .client
            .get(resolved)
            .send()
            .await
            .map_err(|e| AssetError::network(url, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::preload_failed(
                url,
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssetError::network(url, format!("Failed to read body: {e}")))?;

        Ok((bytes, content_type))
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> AssetResult<()> {
        if let Some(payload) = url.strip_prefix("data:") {
            return verify_data_url(url, payload);
        }

        let resolved = self.resolve_url(url)?;
        debug!(url = %url, resolved = %resolved, "Fetching image");

        let (bytes, content_type) = self.download(url, resolved).await?;
        trace!(url = %url, size = bytes.len(), content_type = ?content_type, "Downloaded image");

        if is_svg(url, content_type.as_deref()) {
            return verify_svg(url, &bytes);
        }

        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || verify_raster(&owned_url, &bytes))
            .await
            .map_err(|e| AssetError::decode(url, format!("Decode task panicked: {e}")))?
    }
}

fn is_svg(url: &str, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with("image/svg"))
        || url
            .split(['?', '#'])
            .next()
            .is_some_and(|path| path.to_ascii_lowercase().ends_with(".svg"))
}

fn verify_svg(url: &str, bytes: &[u8]) -> AssetResult<()> {
    let text = String::from_utf8_lossy(bytes);
    if text.contains("<svg") {
        Ok(())
    } else {
        Err(AssetError::decode(url, "response is not an SVG document"))
    }
}

/// Parses the image header. Formats this build cannot decode are accepted
/// as long as they are recognized.
fn verify_raster(url: &str, bytes: &[u8]) -> AssetResult<()> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AssetError::decode(url, e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(AssetError::decode(url, "unrecognized image format"));
    };

    if !format.reading_enabled() {
        trace!(url = %url, format = ?format, "Skipping decode check for format");
        return Ok(());
    }

    reader
        .into_dimensions()
        .map(|_| ())
        .map_err(|e| AssetError::decode(url, e.to_string()))
}

fn verify_data_url(url: &str, payload: &str) -> AssetResult<()> {
    let Some((meta, data)) = payload.split_once(',') else {
        return Err(AssetError::invalid_url(url));
    };

    if !meta.starts_with("image/") {
        return Err(AssetError::decode(url, "data URL is not an image"));
    }

    if meta.ends_with(";base64") {
        let bytes = general_purpose::STANDARD
            .decode(data)
            .map_err(|e| AssetError::decode(url, e.to_string()))?;
        if meta.starts_with("image/svg") {
            return verify_svg(url, &bytes);
        }
        return verify_raster(url, &bytes);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::PlaceholderGenerator;
    use crate::domain::services::PlaceholderOptions;

    fn png_bytes() -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image::RgbImage::new(2, 2)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(&HttpImageFetcherConfig {
            base_url: "https://portfolio.example/app/".to_string(),
            ..HttpImageFetcherConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let fetcher = fetcher();
        assert_eq!(
            fetcher.resolve_url("/images/a.png").unwrap().as_str(),
            "https://portfolio.example/images/a.png"
        );
        assert_eq!(
            fetcher.resolve_url("https://cdn.example/b.png").unwrap().as_str(),
            "https://cdn.example/b.png"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpImageFetcher::new(&HttpImageFetcherConfig {
            base_url: "not a url".to_string(),
            ..HttpImageFetcherConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, AssetError::invalid_url("not a url"));
    }

    #[test]
    fn test_verify_raster() {
        assert!(verify_raster("/a.png", &png_bytes()).is_ok());

        let err = verify_raster("/a.png", b"<html>not found</html>").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn test_truncated_png_fails() {
        let bytes = png_bytes();
        assert!(verify_raster("/a.png", &bytes[..12]).is_err());
    }

    #[test]
    fn test_svg_detection() {
        assert!(is_svg("/images/placeholder.svg?v=2", None));
        assert!(is_svg("/logo", Some("image/svg+xml")));
        assert!(!is_svg("/images/a.png", Some("image/png")));
        assert!(verify_svg("/x.svg", b"<?xml version=\"1.0\"?><svg></svg>").is_ok());
        assert!(verify_svg("/x.svg", b"<html></html>").is_err());
    }

    #[tokio::test]
    async fn test_placeholder_data_url_loads_without_network() {
        let placeholder = PlaceholderGenerator::plain(&PlaceholderOptions::default());
        assert!(fetcher().fetch(&placeholder).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_image_data_url_fails() {
        let result = fetcher().fetch("data:text/plain,hello").await;
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }
}
