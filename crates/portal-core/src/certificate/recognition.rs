//! Rank / other-recognition state of the certificate form.
//!
//! Whether the two fields exclude each other is a configuration choice, see
//! [`RecognitionPolicy`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the rank and other-recognition fields relate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecognitionPolicy {
    /// Choosing one kind clears the other; only the chosen kind is shown and
    /// submitted.
    #[default]
    MutuallyExclusive,
    /// Both fields are shown and submitted when filled in.
    Independent,
}

/// Which recognition field the user is working with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RecognitionKind {
    #[default]
    #[strum(to_string = "unset", serialize = "none")]
    Unset,
    Rank,
    #[strum(to_string = "other_recognition", serialize = "other")]
    OtherRecognition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRecognitionFields {
    pub rank: bool,
    pub other: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    policy: RecognitionPolicy,
    kind: RecognitionKind,
    rank: String,
    other: String,
}

impl Recognition {
    pub fn new(policy: RecognitionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RecognitionPolicy {
        self.policy
    }

    pub fn kind(&self) -> RecognitionKind {
        self.kind
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn other(&self) -> &str {
        &self.other
    }

    /// Selects a kind. Under the exclusive policy the sibling text is
    /// cleared (`Unset` clears both).
    pub fn choose(&mut self, kind: RecognitionKind) {
        self.kind = kind;
        if self.policy == RecognitionPolicy::Independent {
            return;
        }
        match kind {
            RecognitionKind::Unset => {
                self.rank.clear();
                self.other.clear();
            }
            RecognitionKind::Rank => self.other.clear(),
            RecognitionKind::OtherRecognition => self.rank.clear(),
        }
    }

    pub fn set_rank(&mut self, text: &str) {
        if self.kind != RecognitionKind::Rank {
            self.choose(RecognitionKind::Rank);
        }
        self.rank = text.to_string();
    }

    pub fn set_other(&mut self, text: &str) {
        if self.kind != RecognitionKind::OtherRecognition {
            self.choose(RecognitionKind::OtherRecognition);
        }
        self.other = text.to_string();
    }

    pub fn visible(&self) -> VisibleRecognitionFields {
        match self.policy {
            RecognitionPolicy::Independent => VisibleRecognitionFields {
                rank: true,
                other: true,
            },
            RecognitionPolicy::MutuallyExclusive => VisibleRecognitionFields {
                rank: self.kind == RecognitionKind::Rank,
                other: self.kind == RecognitionKind::OtherRecognition,
            },
        }
    }

    /// `(rank, recognition)` as they should be submitted.
    pub fn submitted(&self) -> (Option<String>, Option<String>) {
        let visible = self.visible();
        let pick = |shown: bool, text: &str| {
            let text = text.trim();
            (shown && !text.is_empty()).then(|| text.to_string())
        };
        (pick(visible.rank, &self.rank), pick(visible.other, &self.other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_choice_clears_sibling() {
        let mut recognition = Recognition::new(RecognitionPolicy::MutuallyExclusive);
        recognition.set_rank("1st");
        recognition.set_other("Special Mention");

        assert_eq!(recognition.kind(), RecognitionKind::OtherRecognition);
        assert_eq!(recognition.rank(), "");
        assert_eq!(
            recognition.submitted(),
            (None, Some("Special Mention".to_string()))
        );
        assert_eq!(
            recognition.visible(),
            VisibleRecognitionFields { rank: false, other: true }
        );

        recognition.choose(RecognitionKind::Unset);
        assert_eq!(recognition.submitted(), (None, None));
    }

    #[test]
    fn test_independent_keeps_both() {
        let mut recognition = Recognition::new(RecognitionPolicy::Independent);
        recognition.set_rank("2nd");
        recognition.set_other("Excellence Award");
        recognition.choose(RecognitionKind::Rank);

        assert_eq!(
            recognition.submitted(),
            (Some("2nd".to_string()), Some("Excellence Award".to_string()))
        );
        assert_eq!(
            recognition.visible(),
            VisibleRecognitionFields { rank: true, other: true }
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("other".parse::<RecognitionKind>().unwrap(), RecognitionKind::OtherRecognition);
        assert_eq!("none".parse::<RecognitionKind>().unwrap(), RecognitionKind::Unset);
        assert_eq!("Rank".parse::<RecognitionKind>().unwrap(), RecognitionKind::Rank);
        assert_eq!(
            "independent".parse::<RecognitionPolicy>().unwrap(),
            RecognitionPolicy::Independent
        );
    }
}
