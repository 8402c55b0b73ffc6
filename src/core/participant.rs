use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two values are equal when their labels are, so `Unlisted("female")`
/// and `Female` compare the same and survive a CSV round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Female,
    Male,
    Other,
    /// Free-text answer outside the offered choices.
    Unlisted(String),
}

impl Gender {
    pub fn label(&self) -> &str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
            Gender::Unlisted(s) => s,
        }
    }
}

impl PartialEq for Gender {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl Eq for Gender {}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        match s.trim() {
            "female" => Gender::Female,
            "male" => Gender::Male,
            "other" => Gender::Other,
            t => Gender::Unlisted(t.to_string()),
        }
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Unlisted(s) => s,
            g => g.label().to_string(),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who is playing. Fixed once intake is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    /// As entered; not validated.
    pub age: String,
    pub gender: Gender,
}

impl Participant {
    /// Build from intake answers given in [`IntakeForm`] field order.
    pub fn from_answers(answers: &[String]) -> Result<Self, SessionError> {
        match answers {
            [id, age, gender] => Ok(Self {
                id: id.trim().to_string(),
                age: age.trim().to_string(),
                gender: Gender::from(gender.clone()),
            }),
            _ => Err(SessionError::InvalidInput {
                what: "intake answers",
                got: format!("{} fields", answers.len()),
                expected: "3 fields (id, age, gender)",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeField {
    pub label: String,
    /// Offered answers; empty means free text.
    pub choices: Vec<String>,
}

/// What the metadata dialog asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    pub title: String,
    pub fields: Vec<IntakeField>,
}

impl IntakeForm {
    pub fn participant(gender_choices: &[String]) -> Self {
        Self {
            title: "Slot machine experiment".to_string(),
            fields: vec![
                IntakeField {
                    label: "Participant ID:".to_string(),
                    choices: Vec::new(),
                },
                IntakeField {
                    label: "Age:".to_string(),
                    choices: Vec::new(),
                },
                IntakeField {
                    label: "Gender:".to_string(),
                    choices: gender_choices.to_vec(),
                },
            ],
        }
    }
}

/// Session stamp, taken once before the first trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimestamp(String);

impl SessionTimestamp {
    pub const FORMAT: &'static str = "%Y-%m-%d_%Hh%M.%S.%3f";

    pub fn now() -> Self {
        Self(chrono::Local::now().format(Self::FORMAT).to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_participant_from_three_answers() {
        let p = Participant::from_answers(&answers(&[" p01 ", "27", "male"])).unwrap();
        assert_eq!(p.id, "p01");
        assert_eq!(p.age, "27");
        assert_eq!(p.gender, Gender::Male);
    }

    #[test]
    fn free_text_gender_is_kept() {
        let p = Participant::from_answers(&answers(&["x", "", "agender"])).unwrap();
        assert_eq!(p.gender, Gender::Unlisted("agender".to_string()));
        assert_eq!(p.gender.to_string(), "agender");
        assert_eq!(p.age, "");
    }

    #[test]
    fn unlisted_label_equal_to_a_choice_matches_it() {
        assert_eq!(Gender::Unlisted("female".to_string()), Gender::Female);
        assert_ne!(Gender::Unlisted("Female".to_string()), Gender::Female);
        assert_eq!(
            Gender::from(String::from(Gender::Unlisted("other".to_string()))),
            Gender::Other
        );
    }

    #[test]
    fn wrong_answer_count_is_invalid_input() {
        assert!(matches!(
            Participant::from_answers(&answers(&["p01", "27"])),
            Err(SessionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn form_lists_fields_in_dialog_order() {
        let form = IntakeForm::participant(&answers(&["female", "male", "other"]));
        let labels: Vec<_> = form.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Participant ID:", "Age:", "Gender:"]);
        assert_eq!(form.fields[2].choices.len(), 3);
        assert!(form.fields[0].choices.is_empty());
    }

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = SessionTimestamp::now();
        let s = ts.as_str();
        // 2026-10-19_14h03.27.512
        assert_eq!(s.len(), 23);
        assert_eq!(&s[10..11], "_");
        assert_eq!(&s[13..14], "h");
    }
}
