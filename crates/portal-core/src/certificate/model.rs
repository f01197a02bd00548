use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::catalog::LinkedRow;
use crate::error::{PortalError, Result};
use crate::form::YearAndSem;
use crate::id::EntityId;

/// File types accepted as certificate scans.
pub const ALLOWED_FILE_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CertificateCategory {
    #[default]
    Technical,
    #[serde(alias = "foreign")]
    #[strum(to_string = "foreign_language", serialize = "foreign")]
    ForeignLanguage,
    CoCurricular,
    ExtraCurricular,
}

impl CertificateCategory {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::ForeignLanguage => "Foreign Language",
            Self::CoCurricular => "Co-Curricular",
            Self::ExtraCurricular => "Extra-Curricular",
        }
    }
}

/// A certificate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub category: CertificateCategory,
    #[serde(default)]
    pub year_and_sem: Option<YearAndSem>,
    #[serde(default)]
    pub course_link: Option<String>,
    /// URL of the uploaded scan.
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub recognition: Option<String>,
    #[serde(default)]
    pub course_provider: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub technologies: Vec<LinkedRow>,
}

/// The scan attached to a certificate submission.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CertificateFile {
    /// Wraps file contents, rejecting names without an accepted extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_FILE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PortalError::validation(format!(
                "Certificate must be a PDF, PNG or JPG file (got '{}')",
                file_name
            )));
        }

        Ok(Self { file_name, bytes })
    }
}

impl fmt::Debug for CertificateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateFile")
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}
