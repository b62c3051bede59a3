//! Port for the document head.

use serde::Serialize;

/// Relation of a `<link>` resource hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkRel {
    /// Open the connection early.
    Preconnect,
    /// Resolve DNS early.
    DnsPrefetch,
    /// Fetch the resource early.
    Preload,
}

impl LinkRel {
    /// Attribute value for `rel`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preconnect => "preconnect",
            Self::DnsPrefetch => "dns-prefetch",
            Self::Preload => "preload",
        }
    }
}

/// A resource hint inserted into the document head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkHint {
    /// Hint relation.
    pub rel: LinkRel,
    /// Target URL or origin.
    pub href: String,
}

impl LinkHint {
    /// Preconnect hint for an origin.
    #[must_use]
    pub fn preconnect(origin: impl Into<String>) -> Self {
        Self {
            rel: LinkRel::Preconnect,
            href: origin.into(),
        }
    }
}

/// Port for mutating the document head.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentPort: Send + Sync {
    /// Appends a `<link>` element to the head.
    fn append_link(&self, hint: LinkHint);
}
