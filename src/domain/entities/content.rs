//! Content records served by the portfolio API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::number_or_string;

/// An achievement entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Document id.
    #[serde(with = "number_or_string")]
    pub id: String,
    /// Headline.
    pub title: String,
    /// Event the achievement belongs to.
    #[serde(default)]
    pub event: String,
    /// Short detail line (placement, prize).
    #[serde(default)]
    pub detail: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Human readable date as entered by the author.
    #[serde(default)]
    pub date: String,
    /// Icon name.
    #[serde(default)]
    pub icon: Option<String>,
    /// Accent color class.
    #[serde(default)]
    pub color: Option<String>,
    /// Icon background class.
    #[serde(default)]
    pub icon_bg: Option<String>,
    /// Display order.
    #[serde(default)]
    pub order: Option<i64>,
    /// Creation timestamp set by the server.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A project entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Document id.
    #[serde(with = "number_or_string")]
    pub id: String,
    /// Project name.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Category id used for filtering.
    #[serde(default)]
    pub category: Option<String>,
    /// Technologies used.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Cover image path.
    #[serde(default)]
    pub image: Option<String>,
    /// Source repository link.
    #[serde(default, alias = "githubUrl")]
    pub github: Option<String>,
    /// Live demo link.
    #[serde(default, alias = "liveUrl")]
    pub demo: Option<String>,
    /// Creation timestamp set by the server.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The singleton resume link record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeLink {
    /// Where the resume is hosted.
    pub url: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_from_api_json() {
        let json = r#"{
            "id": "abc123",
            "title": "Winner",
            "event": "Hackathon",
            "detail": "1st place",
            "description": "Built a thing",
            "date": "March 2024",
            "iconBg": "bg-cyan-500",
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;

        let achievement: Achievement = serde_json::from_str(json).unwrap();
        assert_eq!(achievement.id, "abc123");
        assert_eq!(achievement.icon_bg.as_deref(), Some("bg-cyan-500"));
        assert!(achievement.created_at.is_some());
        assert_eq!(achievement.order, None);
    }

    #[test]
    fn test_project_accepts_numeric_id_and_legacy_links() {
        let json = r#"{
            "id": 7,
            "title": "Portfolio",
            "technologies": ["React", "Node"],
            "githubUrl": "https://github.com/example/portfolio",
            "liveUrl": "https://example.dev"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "7");
        assert_eq!(project.technologies.len(), 2);
        assert_eq!(
            project.github.as_deref(),
            Some("https://github.com/example/portfolio")
        );
        assert_eq!(project.demo.as_deref(), Some("https://example.dev"));
    }

    #[test]
    fn test_resume_link() {
        let resume: ResumeLink =
            serde_json::from_str(r#"{"url":"https://example.dev/cv.pdf"}"#).unwrap();
        assert_eq!(resume.url, "https://example.dev/cv.pdf");
        assert!(resume.updated_at.is_none());
    }
}
