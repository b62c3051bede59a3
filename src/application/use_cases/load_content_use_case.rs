//! Content loading use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::PortfolioContent;
use crate::application::services::ToastQueue;
use crate::domain::entities::{Achievement, Project};
use crate::domain::errors::ContentError;
use crate::domain::ports::ContentPort;

/// Loads portfolio content without ever failing the caller.
///
/// API errors become an empty result and an error toast.
#[derive(Clone)]
pub struct LoadContentUseCase {
    content: Arc<dyn ContentPort>,
    toasts: ToastQueue,
}

impl LoadContentUseCase {
    /// Creates new content loading use case.
    #[must_use]
    pub const fn new(content: Arc<dyn ContentPort>, toasts: ToastQueue) -> Self {
        Self { content, toasts }
    }

    /// Achievements sorted by their display order. Entries without an order
    /// come last, keeping their API order.
    pub async fn achievements(&self) -> Vec<Achievement> {
        match self.content.list_achievements().await {
            Ok(mut achievements) => {
                achievements.sort_by_key(|a| a.order.unwrap_or(i64::MAX));
                debug!(count = achievements.len(), "Loaded achievements");
                achievements
            }
            Err(e) => {
                self.report("achievements", &e);
                Vec::new()
            }
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        match self.content.list_projects().await {
            Ok(projects) => {
                debug!(count = projects.len(), "Loaded projects");
                projects
            }
            Err(e) => {
                self.report("projects", &e);
                Vec::new()
            }
        }
    }

    /// Resume URL. A missing record is not an error worth a toast.
    pub async fn resume_url(&self) -> Option<String> {
        match self.content.resume().await {
            Ok(resume) => Some(resume.url),
            Err(ContentError::Status { status: 404, .. }) => {
                debug!("No resume published");
                None
            }
            Err(e) => {
                self.report("resume", &e);
                None
            }
        }
    }

    /// Loads all collections concurrently.
    pub async fn execute(&self) -> PortfolioContent {
        let (achievements, projects, resume_url) =
            tokio::join!(self.achievements(), self.projects(), self.resume_url());

        info!(
            achievements = achievements.len(),
            projects = projects.len(),
            has_resume = resume_url.is_some(),
            "Portfolio content loaded"
        );

        PortfolioContent {
            achievements,
            projects,
            resume_url,
        }
    }

    fn report(&self, what: &str, error: &ContentError) {
        warn!(collection = what, error = %error, "Failed to load content");
        let message = if error.is_network_error() {
            format!("Could not reach the server to load {what}")
        } else {
            format!("Failed to load {what}")
        };
        self.toasts.error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ResumeLink, ToastKind};
    use crate::domain::ports::mocks::MockContentPort;

    fn achievement(id: &str, order: Option<i64>) -> Achievement {
        Achievement {
            id: id.to_string(),
            title: format!("Achievement {id}"),
            event: String::new(),
            detail: String::new(),
            description: String::new(),
            date: String::new(),
            icon: None,
            color: None,
            icon_bg: None,
            order,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_achievements_sorted_with_unordered_last() {
        let port = MockContentPort {
            achievements: vec![
                achievement("c", None),
                achievement("b", Some(2)),
                achievement("a", Some(1)),
                achievement("d", None),
            ],
            ..MockContentPort::default()
        };
        let use_case = LoadContentUseCase::new(Arc::new(port), ToastQueue::default());

        let ids: Vec<String> = use_case
            .achievements()
            .await
            .into_iter()
            .map(|a| a.id)
            .collect();

        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_offline_api_yields_empty_content_and_toasts() {
        let toasts = ToastQueue::default();
        let use_case = LoadContentUseCase::new(Arc::new(MockContentPort::offline()), toasts.clone());

        let content = use_case.execute().await;

        assert!(content.is_empty());
        assert_eq!(toasts.len(), 3);
        assert!(toasts.toasts().iter().all(|t| t.kind == ToastKind::Error));
    }

    #[tokio::test]
    async fn test_missing_resume_is_silent() {
        let toasts = ToastQueue::default();
        let use_case = LoadContentUseCase::new(Arc::new(MockContentPort::default()), toasts.clone());

        assert_eq!(use_case.resume_url().await, None);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn test_execute_collects_everything() {
        let port = MockContentPort {
            achievements: vec![achievement("a", Some(1))],
            resume: Some(ResumeLink {
                url: "https://example.com/resume.pdf".to_string(),
                created_at: None,
                updated_at: None,
            }),
            ..MockContentPort::default()
        };
        let toasts = ToastQueue::default();
        let use_case = LoadContentUseCase::new(Arc::new(port), toasts.clone());

        let content = use_case.execute().await;

        assert_eq!(content.achievements.len(), 1);
        assert!(content.projects.is_empty());
        assert_eq!(content.resume_url.as_deref(), Some("https://example.com/resume.pdf"));
        assert!(toasts.is_empty());
    }
}
