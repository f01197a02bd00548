//! Project form state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::model::{Project, ProjectStatus};
use crate::catalog::Candidate;
use crate::error::{PortalError, Result};
use crate::form::{FormMode, YearAndSem, optional_link, require};
use crate::id::EntityId;
use crate::reference::{ReferencePicker, ReferenceSelection, SerializedReferences};
use crate::user::CurrentUser;

/// Scalar fields of the project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProjectField {
    Title,
    Description,
    YearAndSem,
    GithubLink,
    Status,
}

/// Everything the user has entered in the project form so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub year_and_sem: Option<YearAndSem>,
    pub github_link: String,
    pub status: ProjectStatus,
    pub technologies: ReferencePicker,
    pub contributors: ReferencePicker,
}

/// Normalized payload handed to the backend on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub name: String,
    pub description: String,
    pub year_and_sem: YearAndSem,
    pub status: ProjectStatus,
    pub github_link: Option<String>,
    pub technologies: SerializedReferences,
    pub contributors: SerializedReferences,
}

impl ProjectSubmission {
    /// Multipart form fields in backend naming. Existing references go under
    /// `technologies` / `contributors`, new ones under `new_technologies` /
    /// `new_contributors`.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("name".to_string(), self.name.clone()),
            ("description".to_string(), self.description.clone()),
            ("year_and_sem".to_string(), self.year_and_sem.to_string()),
            ("status".to_string(), self.status.to_string()),
        ];
        if let Some(link) = &self.github_link {
            fields.push(("github_link".to_string(), link.clone()));
        }
        fields.extend(
            self.technologies
                .form_fields("technologies", "new_technologies"),
        );
        fields.extend(
            self.contributors
                .form_fields("contributors", "new_contributors"),
        );
        fields
    }
}

impl ProjectDraft {
    /// An empty draft whose contributors start with the acting user, who
    /// cannot be removed.
    pub fn for_create(acting_user: &CurrentUser) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            year_and_sem: None,
            github_link: String::new(),
            status: ProjectStatus::default(),
            technologies: ReferencePicker::new(ReferenceSelection::new(), true),
            contributors: ReferencePicker::new(
                ReferenceSelection::with_protected(&acting_user.as_candidate()),
                true,
            ),
        }
    }

    /// A draft holding a loaded project. Reference labels are resolved against
    /// the candidate lists when possible. The acting user is not injected, but
    /// stays protected if the project already lists them.
    pub fn for_edit(
        project: &Project,
        acting_user: Option<&CurrentUser>,
        technologies: &[Candidate],
        students: &[Candidate],
    ) -> Self {
        let tech_rows: Vec<Candidate> = project
            .technologies
            .iter()
            .map(|row| row.resolve(technologies))
            .collect();
        let contributor_rows: Vec<Candidate> = project
            .contributors
            .iter()
            .map(|row| row.resolve(students))
            .collect();

        let mut contributors = ReferenceSelection::from_candidates(&contributor_rows);
        if let Some(user) = acting_user {
            contributors.protect(user.id.clone());
        }

        Self {
            mode: FormMode::Edit(project.id.clone()),
            title: project.title.clone(),
            description: project.description.clone(),
            year_and_sem: project.year_and_sem,
            github_link: project.github_link.clone().unwrap_or_default(),
            status: project.status,
            technologies: ReferencePicker::new(ReferenceSelection::from_candidates(&tech_rows), true),
            contributors: ReferencePicker::new(contributors, true),
        }
    }

    pub fn editing_id(&self) -> Option<&EntityId> {
        match &self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }

    /// Sets a scalar field from text input.
    pub fn set_field(&mut self, field: ProjectField, value: &str) -> Result<()> {
        match field {
            ProjectField::Title => self.title = value.to_string(),
            ProjectField::Description => self.description = value.to_string(),
            ProjectField::GithubLink => self.github_link = value.to_string(),
            ProjectField::YearAndSem => self.year_and_sem = Some(YearAndSem::parse(value)?),
            ProjectField::Status => {
                self.status = value.trim().parse().map_err(|_| {
                    PortalError::validation(format!("Unknown project status: '{}'", value.trim()))
                })?
            }
        }
        Ok(())
    }

    /// Validates the draft and builds the submission payload.
    pub fn submission(&self) -> Result<ProjectSubmission> {
        let name = require("Project title", &self.title)?;
        let description = require("Description", &self.description)?;
        let year_and_sem = self
            .year_and_sem
            .ok_or_else(|| PortalError::validation("Year and semester is required"))?;
        let github_link = optional_link("GitHub link", &self.github_link)?;

        Ok(ProjectSubmission {
            name,
            description,
            year_and_sem,
            status: self.status,
            github_link,
            technologies: self.technologies.serialize(),
            contributors: self.contributors.serialize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LinkedRow;
    use crate::reference::ReferenceKey;

    fn alice() -> CurrentUser {
        serde_json::from_value(serde_json::json!({
            "id": 7, "username": "alice", "first_name": "Alice", "last_name": "Liddell"
        }))
        .unwrap()
    }

    fn filled(mut draft: ProjectDraft) -> ProjectDraft {
        draft.set_field(ProjectField::Title, "Portal").unwrap();
        draft.set_field(ProjectField::Description, "A student portal").unwrap();
        draft.set_field(ProjectField::YearAndSem, "III-II").unwrap();
        draft
    }

    #[test]
    fn test_create_seeds_protected_acting_user() {
        let mut draft = ProjectDraft::for_create(&alice());
        assert_eq!(draft.contributors.selection().len(), 1);

        assert!(!draft.contributors.remove(&ReferenceKey::Existing(EntityId::from("7"))));
        assert_eq!(draft.contributors.selection().len(), 1);
    }

    #[test]
    fn test_edit_does_not_inject_acting_user() {
        let project = Project {
            id: EntityId::from("12"),
            title: "Portal".to_string(),
            description: "desc".to_string(),
            year_and_sem: Some(YearAndSem::ThirdFirst),
            github_link: None,
            status: ProjectStatus::Completed,
            technologies: vec![LinkedRow { id: EntityId::from("1"), label: None }],
            contributors: vec![LinkedRow { id: EntityId::from("8"), label: Some("Bob".to_string()) }],
        };
        let techs = vec![Candidate::new("1", "Rust")];

        let draft = ProjectDraft::for_edit(&project, Some(&alice()), &techs, &[]);

        assert_eq!(draft.editing_id(), Some(&EntityId::from("12")));
        assert!(!draft.contributors.selection().contains(&EntityId::from("7")));
        assert_eq!(draft.contributors.selection().items()[0].label(), "Bob");
        assert_eq!(draft.technologies.selection().items()[0].label(), "Rust");
        assert_eq!(draft.status, ProjectStatus::Completed);
    }

    #[test]
    fn test_submission_channels() {
        let mut draft = filled(ProjectDraft::for_create(&alice()));
        draft.technologies.select_existing(&Candidate::new("1", "Rust"));
        draft.technologies.select_new("Go");
        draft.contributors.select_new("Dana");

        let submission = draft.submission().unwrap();
        let fields = submission.form_fields();

        assert!(fields.contains(&("technologies".to_string(), "1".to_string())));
        assert!(fields.contains(&("new_technologies".to_string(), "Go".to_string())));
        assert!(fields.contains(&("contributors".to_string(), "7".to_string())));
        assert!(fields.contains(&("new_contributors".to_string(), "Dana".to_string())));
        assert!(fields.contains(&("year_and_sem".to_string(), "III-II".to_string())));
        assert!(fields.contains(&("status".to_string(), "Initialized".to_string())));
        assert!(!fields.iter().any(|(k, _)| k == "github_link"));
    }

    #[test]
    fn test_submission_validation() {
        let draft = ProjectDraft::for_create(&alice());
        assert_eq!(
            draft.submission().unwrap_err(),
            PortalError::validation("Project title is required")
        );

        let mut draft = filled(ProjectDraft::for_create(&alice()));
        draft.set_field(ProjectField::GithubLink, "not a url").unwrap();
        assert!(draft.submission().unwrap_err().is_validation());

        let mut draft = ProjectDraft::for_create(&alice());
        draft.set_field(ProjectField::Title, "x").unwrap();
        draft.set_field(ProjectField::Description, "y").unwrap();
        assert_eq!(
            draft.submission().unwrap_err(),
            PortalError::validation("Year and semester is required")
        );
    }

    #[test]
    fn test_set_field_parsing() {
        let mut draft = ProjectDraft::for_create(&alice());
        let field: ProjectField = "year_and_sem".parse().unwrap();
        assert_eq!(field, ProjectField::YearAndSem);

        draft.set_field(ProjectField::Status, "completed").unwrap();
        assert_eq!(draft.status, ProjectStatus::Completed);
        assert!(draft.set_field(ProjectField::Status, "done").is_err());
    }
}
