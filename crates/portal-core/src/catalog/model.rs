use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// An entity eligible for selection in a reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: EntityId,
    pub label: String,
}

impl Candidate {
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A technology row (`{id, name}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub id: EntityId,
    pub name: String,
}

impl From<Technology> for Candidate {
    fn from(tech: Technology) -> Self {
        Candidate::new(tech.id, tech.name)
    }
}

impl From<&Technology> for Candidate {
    fn from(tech: &Technology) -> Self {
        Candidate::new(tech.id.clone(), tech.name.clone())
    }
}

/// A student row as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    #[serde(default)]
    pub username: String,
    /// Display name, when the backend sends one instead of split names.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, alias = "rollno")]
    pub roll_no: Option<String>,
    #[serde(default)]
    pub dept: Option<String>,
}

impl Student {
    /// The display name, else "first last", else the username.
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl From<&Student> for Candidate {
    fn from(student: &Student) -> Self {
        Candidate::new(student.id.clone(), student.label())
    }
}

impl From<Student> for Candidate {
    fn from(student: Student) -> Self {
        Candidate::from(&student)
    }
}

/// A row referenced from another entity.
///
/// Detail endpoints either inline the referenced rows (`{id, name}` for
/// technologies, `{id, first_name, last_name}` for students) or send bare
/// primary keys; both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedRow {
    pub id: EntityId,
    pub label: Option<String>,
}

impl<'de> Deserialize<'de> for LinkedRow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawRow {
            Bare(EntityId),
            Inline {
                id: EntityId,
                #[serde(default)]
                name: Option<String>,
                #[serde(default)]
                first_name: Option<String>,
                #[serde(default)]
                last_name: Option<String>,
                #[serde(default)]
                username: Option<String>,
            },
        }

        Ok(match RawRow::deserialize(deserializer)? {
            RawRow::Bare(id) => LinkedRow { id, label: None },
            RawRow::Inline {
                id,
                name,
                first_name,
                last_name,
                username,
            } => {
                let full = format!(
                    "{} {}",
                    first_name.unwrap_or_default().trim(),
                    last_name.unwrap_or_default().trim()
                );
                let label = name
                    .filter(|n| !n.trim().is_empty())
                    .or_else(|| Some(full.trim().to_string()).filter(|f| !f.is_empty()))
                    .or(username);
                LinkedRow { id, label }
            }
        })
    }
}

impl LinkedRow {
    /// Resolves the row to a candidate, preferring the label from `known`,
    /// then the inline label, then `#<id>`.
    pub fn resolve(&self, known: &[Candidate]) -> Candidate {
        let label = known
            .iter()
            .find(|candidate| candidate.id == self.id)
            .map(|candidate| candidate.label.clone())
            .or_else(|| self.label.clone())
            .unwrap_or_else(|| format!("#{}", self.id));
        Candidate::new(self.id.clone(), label)
    }
}
