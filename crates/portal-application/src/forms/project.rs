use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use portal_core::catalog::{CatalogRepository, Candidate};
use portal_core::error::Result;
use portal_core::id::EntityId;
use portal_core::project::{ProjectDraft, ProjectField, ProjectRepository};
use portal_core::reference::{ConfirmOutcome, NewMarker, PanelView, ReferencePicker};
use portal_core::user::CurrentUser;
use tokio::sync::RwLock;

use super::{SubmitGuard, SubmitOutcome, load_students, load_technologies};

pub const PROJECT_CREATE_FAILED_MESSAGE: &str = "Failed to create project. Please try again.";
pub const PROJECT_UPDATE_FAILED_MESSAGE: &str = "Failed to update project. Please try again.";

/// The two reference fields of the project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectReferenceField {
    Technologies,
    Contributors,
}

struct ProjectFormState {
    draft: ProjectDraft,
    banner: Option<String>,
}

/// One open project form, in create or edit mode.
pub struct ProjectFormController {
    projects: Arc<dyn ProjectRepository>,
    technologies: Vec<Candidate>,
    students: Vec<Candidate>,
    state: RwLock<ProjectFormState>,
    submitting: AtomicBool,
}

impl ProjectFormController {
    fn with_draft(
        projects: Arc<dyn ProjectRepository>,
        technologies: Vec<Candidate>,
        students: Vec<Candidate>,
        draft: ProjectDraft,
    ) -> Self {
        Self {
            projects,
            technologies,
            students,
            state: RwLock::new(ProjectFormState {
                draft,
                banner: None,
            }),
            submitting: AtomicBool::new(false),
        }
    }

    /// Opens an empty form with `acting_user` already listed as a contributor.
    pub async fn open_create(
        projects: Arc<dyn ProjectRepository>,
        catalog: Arc<dyn CatalogRepository>,
        acting_user: &CurrentUser,
    ) -> Self {
        let (technologies, students) = futures::join!(
            load_technologies(catalog.as_ref()),
            load_students(catalog.as_ref())
        );
        let draft = ProjectDraft::for_create(acting_user);
        Self::with_draft(projects, technologies, students, draft)
    }

    /// Loads project `id` into a form. Fails when the project cannot be
    /// loaded; candidate list failures only empty the suggestions.
    pub async fn open_edit(
        projects: Arc<dyn ProjectRepository>,
        catalog: Arc<dyn CatalogRepository>,
        id: &EntityId,
        acting_user: Option<&CurrentUser>,
    ) -> Result<Self> {
        let (project, technologies, students) = futures::join!(
            projects.find_by_id(id),
            load_technologies(catalog.as_ref()),
            load_students(catalog.as_ref())
        );
        let project = project?;
        tracing::debug!(project_id = %project.id, "Editing project");

        let draft = ProjectDraft::for_edit(&project, acting_user, &technologies, &students);
        Ok(Self::with_draft(projects, technologies, students, draft))
    }

    pub fn candidates(&self, field: ProjectReferenceField) -> &[Candidate] {
        match field {
            ProjectReferenceField::Technologies => &self.technologies,
            ProjectReferenceField::Contributors => &self.students,
        }
    }

    fn picker(draft: &ProjectDraft, field: ProjectReferenceField) -> &ReferencePicker {
        match field {
            ProjectReferenceField::Technologies => &draft.technologies,
            ProjectReferenceField::Contributors => &draft.contributors,
        }
    }

    fn picker_mut(draft: &mut ProjectDraft, field: ProjectReferenceField) -> &mut ReferencePicker {
        match field {
            ProjectReferenceField::Technologies => &mut draft.technologies,
            ProjectReferenceField::Contributors => &mut draft.contributors,
        }
    }

    pub async fn draft(&self) -> ProjectDraft {
        self.state.read().await.draft.clone()
    }

    pub async fn banner(&self) -> Option<String> {
        self.state.read().await.banner.clone()
    }

    pub async fn dismiss_banner(&self) {
        self.state.write().await.banner = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn set_field(&self, field: ProjectField, value: &str) -> Result<()> {
        self.state.write().await.draft.set_field(field, value)
    }

    pub async fn set_query(&self, field: ProjectReferenceField, query: &str) {
        let mut state = self.state.write().await;
        Self::picker_mut(&mut state.draft, field).set_query(query);
    }

    pub async fn panel(&self, field: ProjectReferenceField) -> PanelView {
        let state = self.state.read().await;
        Self::picker(&state.draft, field).panel(self.candidates(field))
    }

    /// Suggestions currently offered for `field`, in display order.
    pub async fn suggestions(&self, field: ProjectReferenceField) -> Vec<Candidate> {
        let state = self.state.read().await;
        Self::picker(&state.draft, field)
            .suggestions(self.candidates(field))
            .to_vec()
    }

    /// Selects the suggestion at `index` (0-based). Returns whether it was
    /// added.
    pub async fn pick(&self, field: ProjectReferenceField, index: usize) -> bool {
        let mut state = self.state.write().await;
        let picker = Self::picker_mut(&mut state.draft, field);
        let Some(candidate) = picker.suggestions(self.candidates(field)).iter().nth(index).cloned()
        else {
            return false;
        };
        picker.select_existing(&candidate)
    }

    pub async fn add_new(&self, field: ProjectReferenceField, label: &str) -> Option<NewMarker> {
        let mut state = self.state.write().await;
        Self::picker_mut(&mut state.draft, field).select_new(label)
    }

    /// Keyboard "accept" on `field`: first suggestion wins, else a new entry.
    pub async fn confirm(&self, field: ProjectReferenceField) -> ConfirmOutcome {
        let mut state = self.state.write().await;
        Self::picker_mut(&mut state.draft, field).keyboard_confirm(self.candidates(field))
    }

    /// Removes the selected item at `position` (0-based). Protected and
    /// out-of-range positions are ignored.
    pub async fn remove(&self, field: ProjectReferenceField, position: usize) -> bool {
        let mut state = self.state.write().await;
        let picker = Self::picker_mut(&mut state.draft, field);
        let Some(key) = picker.selection().items().get(position).map(|item| item.key()) else {
            return false;
        };
        picker.remove(&key)
    }

    pub async fn click_outside(&self) {
        let mut state = self.state.write().await;
        state.draft.technologies.click_outside();
        state.draft.contributors.click_outside();
    }

    /// Validates and sends the draft. At most one submit runs at a time; a
    /// failure sets the banner and keeps the draft as it is.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            tracing::debug!("Project submit ignored, one is already outstanding");
            return SubmitOutcome::AlreadySubmitting;
        };

        let (submission, editing) = {
            let state = self.state.read().await;
            (state.draft.submission(), state.draft.editing_id().cloned())
        };
        let fallback = if editing.is_some() {
            PROJECT_UPDATE_FAILED_MESSAGE
        } else {
            PROJECT_CREATE_FAILED_MESSAGE
        };

        let submission = match submission {
            Ok(submission) => submission,
            Err(e) => {
                let message = e.detail_or(fallback);
                self.state.write().await.banner = Some(message.clone());
                return SubmitOutcome::Invalid(message);
            }
        };

        let result = match &editing {
            Some(id) => self.projects.update(id, &submission).await,
            None => self.projects.create(&submission).await,
        };

        match result {
            Ok(()) => {
                self.state.write().await.banner = None;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::error!(error = %e, editing = ?editing, "Project submit failed");
                let message = e.detail_or(fallback);
                self.state.write().await.banner = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
