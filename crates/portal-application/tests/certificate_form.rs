mod common;

use std::sync::Arc;

use common::InMemoryBackend;
use portal_application::SubmitOutcome;
use portal_application::forms::{CERTIFICATE_CREATE_FAILED_MESSAGE, CertificateFormController};
use portal_core::certificate::{
    CertificateCategory, CertificateField, CertificateFile, RecognitionKind, RecognitionPolicy,
    VisibleRecognitionFields,
};
use portal_core::error::PortalError;
use portal_core::id::EntityId;

async fn open(
    backend: &Arc<InMemoryBackend>,
    category: CertificateCategory,
    policy: RecognitionPolicy,
) -> CertificateFormController {
    CertificateFormController::open(backend.clone(), backend.clone(), category, policy).await
}

async fn fill(form: &CertificateFormController) {
    form.set_field(CertificateField::Title, "Rust Fundamentals").await.unwrap();
    form.set_field(CertificateField::Source, "Coursera").await.unwrap();
    form.set_field(CertificateField::YearAndSem, "II-II").await.unwrap();
    form.attach_file(CertificateFile::new("rust.pdf", b"%PDF-1.7".to_vec()).unwrap())
        .await;
}

#[tokio::test]
async fn test_technical_certificate_with_technologies() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::Technical, RecognitionPolicy::MutuallyExclusive).await;
    fill(&form).await;

    assert!(form.shows_technologies().await);
    form.set_technology_query("rust").await;
    assert!(form.pick_technology(0).await);
    form.add_technology("Axum").await;
    form.set_field(CertificateField::Rank, "2nd").await.unwrap();

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);

    let created = backend.created_certificates.lock().unwrap();
    let submission = &created[0];
    assert_eq!(submission.technologies.existing, vec![EntityId::from("1")]);
    assert_eq!(submission.technologies.new, vec!["Axum".to_string()]);
    assert_eq!(submission.rank.as_deref(), Some("2nd"));
    assert_eq!(submission.recognition, None);
    assert_eq!(submission.event_type, "others");
    assert_eq!(submission.file.file_name, "rust.pdf");
}

#[tokio::test]
async fn test_other_categories_drop_technologies() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::Technical, RecognitionPolicy::MutuallyExclusive).await;
    fill(&form).await;
    form.add_technology("Axum").await;

    form.set_field(CertificateField::Category, "extra_curricular").await.unwrap();

    assert!(!form.shows_technologies().await);
    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    let created = backend.created_certificates.lock().unwrap();
    assert!(created[0].technologies.is_empty());
    assert_eq!(created[0].category, CertificateCategory::ExtraCurricular);
}

#[tokio::test]
async fn test_exclusive_recognition_policy() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::CoCurricular, RecognitionPolicy::MutuallyExclusive).await;
    fill(&form).await;

    form.set_field(CertificateField::Rank, "1st").await.unwrap();
    form.choose_recognition(RecognitionKind::OtherRecognition).await;
    form.set_field(CertificateField::Recognition, "Best Paper").await.unwrap();

    assert_eq!(
        form.visible_recognition().await,
        VisibleRecognitionFields { rank: false, other: true }
    );
    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    let created = backend.created_certificates.lock().unwrap();
    assert_eq!(created[0].rank, None);
    assert_eq!(created[0].recognition.as_deref(), Some("Best Paper"));
}

#[tokio::test]
async fn test_independent_recognition_policy() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::CoCurricular, RecognitionPolicy::Independent).await;
    fill(&form).await;

    form.set_field(CertificateField::Rank, "1st").await.unwrap();
    form.set_field(CertificateField::Recognition, "Best Paper").await.unwrap();

    assert_eq!(form.submit().await, SubmitOutcome::Submitted);
    let created = backend.created_certificates.lock().unwrap();
    assert_eq!(created[0].rank.as_deref(), Some("1st"));
    assert_eq!(created[0].recognition.as_deref(), Some("Best Paper"));
}

#[tokio::test]
async fn test_missing_file_is_invalid() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::Technical, RecognitionPolicy::MutuallyExclusive).await;
    form.set_field(CertificateField::Title, "t").await.unwrap();
    form.set_field(CertificateField::Source, "s").await.unwrap();
    form.set_field(CertificateField::YearAndSem, "I-I").await.unwrap();

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid("Certificate file is required".to_string()));
    assert!(backend.created_certificates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_detail_is_shown() {
    let backend = Arc::new(InMemoryBackend::with_catalog());
    let form = open(&backend, CertificateCategory::Technical, RecognitionPolicy::MutuallyExclusive).await;
    fill(&form).await;

    *backend.write_error.lock().unwrap() =
        Some(PortalError::rejected(400, Some("Certificate already exists".to_string())));
    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed("Certificate already exists".to_string())
    );
    assert_eq!(form.banner().await.as_deref(), Some("Certificate already exists"));

    *backend.write_error.lock().unwrap() = Some(PortalError::transport("reset"));
    assert_eq!(
        form.submit().await,
        SubmitOutcome::Failed(CERTIFICATE_CREATE_FAILED_MESSAGE.to_string())
    );
}
