//! Pieces shared by the project and certificate forms.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{PortalError, Result};
use crate::id::EntityId;

/// Academic year and semester, e.g. `III-II`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
pub enum YearAndSem {
    #[serde(rename = "I-I")]
    #[strum(serialize = "I-I")]
    FirstFirst,
    #[serde(rename = "I-II")]
    #[strum(serialize = "I-II")]
    FirstSecond,
    #[serde(rename = "II-I")]
    #[strum(serialize = "II-I")]
    SecondFirst,
    #[serde(rename = "II-II")]
    #[strum(serialize = "II-II")]
    SecondSecond,
    #[serde(rename = "III-I")]
    #[strum(serialize = "III-I")]
    ThirdFirst,
    #[serde(rename = "III-II")]
    #[strum(serialize = "III-II")]
    ThirdSecond,
    #[serde(rename = "IV-I")]
    #[strum(serialize = "IV-I")]
    FourthFirst,
    #[serde(rename = "IV-II")]
    #[strum(serialize = "IV-II")]
    FourthSecond,
}

impl YearAndSem {
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse()
            .map_err(|_| PortalError::validation(format!("Unknown year and semester: '{}'", value.trim())))
    }
}

/// Whether a form creates a new entity or edits a loaded one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }
}

/// Trims `value` and rejects it when blank.
pub(crate) fn require(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional link; blank means absent, anything else must be http(s).
pub(crate) fn optional_link(field: &str, value: &str) -> Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(Some(trimmed.to_string()))
    } else {
        Err(PortalError::validation(format!(
            "{field} must be an http(s) URL"
        )))
    }
}

/// Trims an optional free-text value; blank means absent.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_year_and_sem_round_trip_names() {
        let names: Vec<String> = YearAndSem::iter().map(|y| y.to_string()).collect();
        assert_eq!(
            names,
            vec!["I-I", "I-II", "II-I", "II-II", "III-I", "III-II", "IV-I", "IV-II"]
        );
        assert_eq!(YearAndSem::parse(" III-II ").unwrap(), YearAndSem::ThirdSecond);
        assert!(YearAndSem::parse("V-I").unwrap_err().is_validation());
        assert_eq!(serde_json::to_string(&YearAndSem::FourthFirst).unwrap(), "\"IV-I\"");
    }

    #[test]
    fn test_optional_link() {
        assert_eq!(optional_link("GitHub link", "  ").unwrap(), None);
        assert_eq!(
            optional_link("GitHub link", "https://github.com/a/b").unwrap().as_deref(),
            Some("https://github.com/a/b")
        );
        assert!(optional_link("GitHub link", "github.com/a/b").is_err());
    }

    #[test]
    fn test_require() {
        assert_eq!(require("Title", " x ").unwrap(), "x");
        assert_eq!(
            require("Title", "  ").unwrap_err(),
            PortalError::validation("Title is required")
        );
    }
}
