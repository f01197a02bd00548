//! Certificate domain module.
//!
//! # Module Structure
//!
//! - `model`: the certificate entity, its category and the uploaded file
//! - `recognition`: rank / other-recognition state under a configurable policy
//! - `draft`: the certificate form state and its submission payload
//! - `repository`: backend operations on certificates

mod draft;
mod model;
mod recognition;
mod repository;

pub use draft::{CertificateDraft, CertificateField, CertificateSubmission};
pub use model::{ALLOWED_FILE_EXTENSIONS, Certificate, CertificateCategory, CertificateFile};
pub use recognition::{Recognition, RecognitionKind, RecognitionPolicy, VisibleRecognitionFields};
pub use repository::CertificateRepository;
