use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use portal_core::catalog::{CatalogRepository, Candidate};
use portal_core::certificate::{
    CertificateCategory, CertificateDraft, CertificateField, CertificateFile, CertificateRepository,
    RecognitionKind, RecognitionPolicy, VisibleRecognitionFields,
};
use portal_core::error::Result;
use portal_core::reference::{ConfirmOutcome, NewMarker, PanelView};
use tokio::sync::RwLock;

use super::{SubmitGuard, SubmitOutcome, load_technologies};

pub const CERTIFICATE_CREATE_FAILED_MESSAGE: &str = "Failed to create certificate. Please try again.";

struct CertificateFormState {
    draft: CertificateDraft,
    banner: Option<String>,
}

/// One open "add certificate" form.
pub struct CertificateFormController {
    certificates: Arc<dyn CertificateRepository>,
    technologies: Vec<Candidate>,
    state: RwLock<CertificateFormState>,
    submitting: AtomicBool,
}

impl CertificateFormController {
    pub async fn open(
        certificates: Arc<dyn CertificateRepository>,
        catalog: Arc<dyn CatalogRepository>,
        category: CertificateCategory,
        policy: RecognitionPolicy,
    ) -> Self {
        let technologies = load_technologies(catalog.as_ref()).await;
        Self {
            certificates,
            technologies,
            state: RwLock::new(CertificateFormState {
                draft: CertificateDraft::new(category, policy),
                banner: None,
            }),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn technology_candidates(&self) -> &[Candidate] {
        &self.technologies
    }

    pub async fn draft(&self) -> CertificateDraft {
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

    pub async fn set_field(&self, field: CertificateField, value: &str) -> Result<()> {
        self.state.write().await.draft.set_field(field, value)
    }

    pub async fn attach_file(&self, file: CertificateFile) {
        self.state.write().await.draft.attach_file(file);
    }

    pub async fn choose_recognition(&self, kind: RecognitionKind) {
        self.state.write().await.draft.recognition.choose(kind);
    }

    pub async fn visible_recognition(&self) -> VisibleRecognitionFields {
        self.state.read().await.draft.recognition.visible()
    }

    pub async fn shows_technologies(&self) -> bool {
        self.state.read().await.draft.shows_technologies()
    }

    pub async fn set_technology_query(&self, query: &str) {
        self.state.write().await.draft.technologies.set_query(query);
    }

    pub async fn technology_panel(&self) -> PanelView {
        self.state.read().await.draft.technologies.panel(&self.technologies)
    }

    pub async fn technology_suggestions(&self) -> Vec<Candidate> {
        self.state
            .read()
            .await
            .draft
            .technologies
            .suggestions(&self.technologies)
            .to_vec()
    }

    /// Selects the technology suggestion at `index` (0-based).
    pub async fn pick_technology(&self, index: usize) -> bool {
        let mut state = self.state.write().await;
        let picker = &mut state.draft.technologies;
        let Some(candidate) = picker.suggestions(&self.technologies).iter().nth(index).cloned() else {
            return false;
        };
        picker.select_existing(&candidate)
    }

    pub async fn add_technology(&self, label: &str) -> Option<NewMarker> {
        self.state.write().await.draft.technologies.select_new(label)
    }

    pub async fn confirm_technology(&self) -> ConfirmOutcome {
        self.state
            .write()
            .await
            .draft
            .technologies
            .keyboard_confirm(&self.technologies)
    }

    pub async fn remove_technology(&self, position: usize) -> bool {
        let mut state = self.state.write().await;
        let picker = &mut state.draft.technologies;
        let Some(key) = picker.selection().items().get(position).map(|item| item.key()) else {
            return false;
        };
        picker.remove(&key)
    }

    pub async fn click_outside(&self) {
        self.state.write().await.draft.technologies.click_outside();
    }

    /// Validates and uploads the certificate. Same submit rules as the
    /// project form.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = SubmitGuard::acquire(&self.submitting) else {
            tracing::debug!("Certificate submit ignored, one is already outstanding");
            return SubmitOutcome::AlreadySubmitting;
        };

        let submission = self.state.read().await.draft.submission();
        let submission = match submission {
            Ok(submission) => submission,
            Err(e) => {
                let message = e.detail_or(CERTIFICATE_CREATE_FAILED_MESSAGE);
                self.state.write().await.banner = Some(message.clone());
                return SubmitOutcome::Invalid(message);
            }
        };

        match self.certificates.create(&submission).await {
            Ok(()) => {
                self.state.write().await.banner = None;
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::error!(error = %e, title = %submission.title, "Certificate submit failed");
                let message = e.detail_or(CERTIFICATE_CREATE_FAILED_MESSAGE);
                self.state.write().await.banner = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
