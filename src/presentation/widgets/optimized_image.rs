//! Image that prefers a modern-format sibling, with `<picture>` sources.

use std::fmt::Write as _;

use crate::application::services::{ImageOptimizer, ResolvedImage};
use crate::domain::services::escape_markup;

use super::lazy_image::{DEFAULT_FALLBACK_SRC, classes, render_img, render_unavailable};

/// An explicit `<source>` inside the `<picture>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub src: String,
    pub mime_type: Option<String>,
    pub media: Option<String>,
}

impl ImageSource {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: None,
            media: None,
        }
    }

    #[must_use]
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    #[must_use]
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    fn render(&self, sizes: Option<&str>) -> String {
        let mut out = format!(r#"<source srcset="{}""#, escape_markup(&self.src));
        for (name, value) in [
            ("type", self.mime_type.as_deref()),
            ("media", self.media.as_deref()),
            ("sizes", sizes),
        ] {
            if let Some(value) = value {
                let _ = write!(out, r#" {name}="{}""#, escape_markup(value));
            }
        }
        out.push('>');
        out
    }
}

/// Image resolved through the optimized -> original -> fallback chain.
#[derive(Debug, Clone)]
pub struct OptimizedImage {
    src: String,
    alt: String,
    class_name: String,
    priority: bool,
    sources: Vec<ImageSource>,
    sizes: Option<String>,
    fallback_src: String,
    resolved: Option<ResolvedImage>,
}

impl OptimizedImage {
    #[must_use]
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            class_name: String::new(),
            priority: false,
            sources: Vec::new(),
            sizes: None,
            fallback_src: DEFAULT_FALLBACK_SRC.to_string(),
            resolved: None,
        }
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn source(mut self, source: ImageSource) -> Self {
        self.sources.push(source);
        self
    }

    #[must_use]
    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback_src: impl Into<String>) -> Self {
        self.fallback_src = fallback_src.into();
        self
    }

    #[must_use]
    pub const fn resolved(&self) -> Option<&ResolvedImage> {
        self.resolved.as_ref()
    }

    /// Resolves the image and remembers the outcome.
    pub async fn load(&mut self, optimizer: &ImageOptimizer) -> &ResolvedImage {
        let resolved = optimizer
            .resolve(&self.src, Some(self.fallback_src.as_str()).filter(|f| *f != self.src))
            .await;
        self.resolved.insert(resolved)
    }

    #[must_use]
    pub fn render(&self) -> String {
        let inner_class = if self.sources.is_empty() {
            self.class_name.as_str()
        } else {
            "w-full h-full"
        };

        let image = match &self.resolved {
            None => render_img(&self.src, &self.alt, inner_class, false, self.priority),
            Some(ResolvedImage::Unavailable) => render_unavailable(inner_class),
            Some(resolved) => render_img(
                resolved.src().unwrap_or(&self.src),
                &self.alt,
                inner_class,
                true,
                self.priority,
            ),
        };

        if self.sources.is_empty() {
            return image;
        }

        let sources: String = self
            .sources
            .iter()
            .map(|source| source.render(self.sizes.as_deref()))
            .collect();
        format!(
            r#"<picture class="{}">{sources}{image}</picture>"#,
            classes(&[self.class_name.as_str()])
        )
    }
}
