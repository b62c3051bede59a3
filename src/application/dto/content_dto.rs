//! Content DTOs.

use serde::Serialize;

use crate::domain::entities::{Achievement, Project};

/// Everything the content pages display, loaded in one go.
///
/// Empty collections mean the API had nothing or could not be reached; the
/// failure itself is reported through a toast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioContent {
    /// Achievements ordered for display.
    pub achievements: Vec<Achievement>,
    /// Projects in API order.
    pub projects: Vec<Project>,
    /// Resume URL, if one has been published.
    pub resume_url: Option<String>,
}

impl PortfolioContent {
    /// Returns true when no content was loaded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty() && self.projects.is_empty() && self.resume_url.is_none()
    }
}
