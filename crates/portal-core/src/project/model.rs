use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::catalog::LinkedRow;
use crate::form::YearAndSem;
use crate::id::EntityId;

/// Progress of a project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ProjectStatus {
    #[default]
    Initialized,
    #[serde(rename = "In Progress", alias = "In_progress")]
    #[strum(to_string = "In Progress", serialize = "In_progress", serialize = "in-progress")]
    InProgress,
    Completed,
}

/// A project as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year_and_sem: Option<YearAndSem>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub technologies: Vec<LinkedRow>,
    #[serde(default)]
    pub contributors: Vec<LinkedRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_detail_payload() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 12,
            "title": "Portal",
            "description": "Student portal",
            "year_and_sem": "III-II",
            "github_link": "",
            "status": "In_progress",
            "technologies": [1, {"id": 2, "name": "Rust"}],
            "contributors": [{"id": 7, "first_name": "Alice", "last_name": "L"}]
        }))
        .unwrap();

        assert_eq!(project.id, EntityId::from("12"));
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.year_and_sem, Some(YearAndSem::ThirdSecond));
        assert_eq!(project.technologies.len(), 2);
        assert_eq!(project.contributors[0].label.as_deref(), Some("Alice L"));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(ProjectStatus::InProgress.to_string(), "In Progress");
        assert_eq!("in-progress".parse::<ProjectStatus>().unwrap(), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::default(), ProjectStatus::Initialized);
    }
}
