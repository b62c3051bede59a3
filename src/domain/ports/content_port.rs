//! Port definition for the portfolio content API.

use async_trait::async_trait;

use crate::domain::entities::{Achievement, Project, ResumeLink};
use crate::domain::errors::ContentError;

/// Read access to the content collections.
#[async_trait]
pub trait ContentPort: Send + Sync {
    /// Lists all achievements.
    async fn list_achievements(&self) -> Result<Vec<Achievement>, ContentError>;

    /// Lists all projects.
    async fn list_projects(&self) -> Result<Vec<Project>, ContentError>;

    /// Fetches the resume link record.
    async fn resume(&self) -> Result<ResumeLink, ContentError>;
}
