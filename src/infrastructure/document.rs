//! In-memory document head.

use parking_lot::Mutex;
use tracing::trace;

use crate::domain::ports::{DocumentPort, LinkHint};
use crate::domain::services::escape_markup;

/// Collects the link hints appended to the document head.
///
/// Appending the same hint twice keeps a single element.
#[derive(Debug, Default)]
pub struct HeadDocument {
    links: Mutex<Vec<LinkHint>>,
}

impl HeadDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link hints in insertion order.
    #[must_use]
    pub fn links(&self) -> Vec<LinkHint> {
        self.links.lock().clone()
    }

    /// Renders the hints as `<link>` elements, one per line.
    #[must_use]
    pub fn render_head(&self) -> String {
        self.links
            .lock()
            .iter()
            .map(|hint| {
                format!(
                    r#"<link rel="{}" href="{}">"#,
                    hint.rel.as_str(),
                    escape_markup(&hint.href)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentPort for HeadDocument {
    fn append_link(&self, hint: LinkHint) {
        let mut links = self.links.lock();
        if links.contains(&hint) {
            trace!(href = %hint.href, "Link hint already present");
            return;
        }
        links.push(hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LinkRel;

    #[test]
    fn test_duplicate_hints_collapse() {
        let head = HeadDocument::new();
        head.append_link(LinkHint::preconnect("https://fonts.example"));
        head.append_link(LinkHint::preconnect("https://fonts.example"));
        head.append_link(LinkHint {
            rel: LinkRel::DnsPrefetch,
            href: "https://fonts.example".to_string(),
        });

        assert_eq!(head.links().len(), 2);
    }

    #[test]
    fn test_render_head() {
        let head = HeadDocument::new();
        head.append_link(LinkHint::preconnect("https://a.example"));
        head.append_link(LinkHint::preconnect("https://b.example/?x=1&y=2"));

        assert_eq!(
            head.render_head(),
            "<link rel=\"preconnect\" href=\"https://a.example\">\n\
             <link rel=\"preconnect\" href=\"https://b.example/?x=1&amp;y=2\">"
        );
    }
}
