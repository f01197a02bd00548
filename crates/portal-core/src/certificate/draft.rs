//! Certificate form state.

use serde::Serialize;
use strum::{Display, EnumString};

use super::model::{CertificateCategory, CertificateFile};
use super::recognition::{Recognition, RecognitionPolicy};
use crate::error::{PortalError, Result};
use crate::form::{YearAndSem, optional_link, optional_text, require};
use crate::reference::{ReferencePicker, ReferenceSelection, SerializedReferences};

/// Event type sent when the user did not pick one.
const DEFAULT_EVENT_TYPE: &str = "others";

/// Text fields of the certificate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CertificateField {
    Title,
    Source,
    Category,
    YearAndSem,
    CourseLink,
    CourseProvider,
    Domain,
    Duration,
    EventType,
    FestName,
    Rank,
    Recognition,
}

#[derive(Debug, Clone)]
pub struct CertificateDraft {
    pub title: String,
    pub source: String,
    pub category: CertificateCategory,
    pub year_and_sem: Option<YearAndSem>,
    pub file: Option<CertificateFile>,
    pub course_link: String,
    pub course_provider: String,
    pub domain: String,
    pub duration: String,
    pub event_type: String,
    pub fest_name: String,
    pub recognition: Recognition,
    pub technologies: ReferencePicker,
}

/// Normalized payload handed to the backend on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSubmission {
    pub title: String,
    pub source: String,
    pub category: CertificateCategory,
    pub year_and_sem: YearAndSem,
    pub course_link: Option<String>,
    pub course_provider: Option<String>,
    pub domain: Option<String>,
    pub duration: Option<String>,
    pub event_type: String,
    pub fest_name: Option<String>,
    pub rank: Option<String>,
    pub recognition: Option<String>,
    pub technologies: SerializedReferences,
    #[serde(skip)]
    pub file: CertificateFile,
}

impl CertificateSubmission {
    /// Text parts of the multipart form; empty optional fields are left out.
    /// The scan travels separately under `certificate`.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("title".to_string(), self.title.clone()),
            ("source".to_string(), self.source.clone()),
            ("category".to_string(), self.category.to_string()),
            ("year_and_sem".to_string(), self.year_and_sem.to_string()),
            ("event_type".to_string(), self.event_type.clone()),
        ];
        let optional = [
            ("course_link", &self.course_link),
            ("course_provider", &self.course_provider),
            ("domain", &self.domain),
            ("duration", &self.duration),
            ("fest_name", &self.fest_name),
            ("rank", &self.rank),
            ("recognition", &self.recognition),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                fields.push((name.to_string(), value.clone()));
            }
        }
        fields.extend(
            self.technologies
                .form_fields("technologies", "new_technologies"),
        );
        fields
    }
}

impl CertificateDraft {
    pub fn new(category: CertificateCategory, policy: RecognitionPolicy) -> Self {
        Self {
            title: String::new(),
            source: String::new(),
            category,
            year_and_sem: None,
            file: None,
            course_link: String::new(),
            course_provider: String::new(),
            domain: String::new(),
            duration: String::new(),
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            fest_name: String::new(),
            recognition: Recognition::new(policy),
            technologies: ReferencePicker::new(ReferenceSelection::new(), true),
        }
    }

    /// Technologies only apply to technical certificates.
    pub fn shows_technologies(&self) -> bool {
        self.category == CertificateCategory::Technical
    }

    pub fn attach_file(&mut self, file: CertificateFile) {
        self.file = Some(file);
    }

    pub fn set_field(&mut self, field: CertificateField, value: &str) -> Result<()> {
        match field {
            CertificateField::Title => self.title = value.to_string(),
            CertificateField::Source => self.source = value.to_string(),
            CertificateField::Category => {
                self.category = value.trim().parse().map_err(|_| {
                    PortalError::validation(format!("Unknown certificate category: '{}'", value.trim()))
                })?
            }
            CertificateField::YearAndSem => self.year_and_sem = Some(YearAndSem::parse(value)?),
            CertificateField::CourseLink => self.course_link = value.to_string(),
            CertificateField::CourseProvider => self.course_provider = value.to_string(),
            CertificateField::Domain => self.domain = value.to_string(),
            CertificateField::Duration => self.duration = value.to_string(),
            CertificateField::EventType => self.event_type = value.to_string(),
            CertificateField::FestName => self.fest_name = value.to_string(),
            CertificateField::Rank => self.recognition.set_rank(value),
            CertificateField::Recognition => self.recognition.set_other(value),
        }
        Ok(())
    }

    /// Validates the draft and builds the submission payload.
    pub fn submission(&self) -> Result<CertificateSubmission> {
        let title = require("Certificate title", &self.title)?;
        let source = require("Source", &self.source)?;
        let year_and_sem = self
            .year_and_sem
            .ok_or_else(|| PortalError::validation("Year and semester is required"))?;
        let file = self
            .file
            .clone()
            .ok_or_else(|| PortalError::validation("Certificate file is required"))?;
        let course_link = optional_link("Course link", &self.course_link)?;
        let (rank, recognition) = self.recognition.submitted();

        let technologies = if self.shows_technologies() {
            self.technologies.serialize()
        } else {
            SerializedReferences::default()
        };

        Ok(CertificateSubmission {
            title,
            source,
            category: self.category,
            year_and_sem,
            course_link,
            course_provider: optional_text(&self.course_provider),
            domain: optional_text(&self.domain),
            duration: optional_text(&self.duration),
            event_type: optional_text(&self.event_type).unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
            fest_name: optional_text(&self.fest_name),
            rank,
            recognition,
            technologies,
            file,
        })
    }
}
