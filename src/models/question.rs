use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: Uuid,
    pub text: String,
}

/// One ordered pair of a concept-relation question: `concept` must be
/// related to `relates_to` in exactly this slot of the list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptPair {
    pub concept: String,
    pub relates_to: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    MultipleSelection,
    Ordering,
    ConceptRelation,
    Open,
}

impl QuestionType {
    /// The stable wire discriminator for this question type, identical to
    /// the `type` tag serde writes.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::MultipleSelection => "multiple_selection",
            QuestionType::Ordering => "ordering",
            QuestionType::ConceptRelation => "concept_relation",
            QuestionType::Open => "open",
        }
    }
}

/// A test question. The variant set is closed: decoding dispatches on the
/// `type` tag and an unknown tag is a hard failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice {
        id: Uuid,
        title: String,
        image_url: Option<String>,
        options: Vec<AnswerOption>,
        correct_option: Uuid,
    },
    MultipleSelection {
        id: Uuid,
        title: String,
        image_url: Option<String>,
        options: Vec<AnswerOption>,
        correct_options: BTreeSet<Uuid>,
    },
    Ordering {
        id: Uuid,
        title: String,
        image_url: Option<String>,
        sequence: Vec<String>,
    },
    ConceptRelation {
        id: Uuid,
        title: String,
        image_url: Option<String>,
        pairs: Vec<ConceptPair>,
    },
    Open {
        id: Uuid,
        title: String,
        image_url: Option<String>,
    },
}

impl Question {
    pub fn id(&self) -> Uuid {
        match self {
            Question::MultipleChoice { id, .. }
            | Question::MultipleSelection { id, .. }
            | Question::Ordering { id, .. }
            | Question::ConceptRelation { id, .. }
            | Question::Open { id, .. } => *id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Question::MultipleChoice { title, .. }
            | Question::MultipleSelection { title, .. }
            | Question::Ordering { title, .. }
            | Question::ConceptRelation { title, .. }
            | Question::Open { title, .. } => title,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Question::MultipleSelection { .. } => QuestionType::MultipleSelection,
            Question::Ordering { .. } => QuestionType::Ordering,
            Question::ConceptRelation { .. } => QuestionType::ConceptRelation,
            Question::Open { .. } => QuestionType::Open,
        }
    }

    /// Point weight, always derived from the question shape: one point for
    /// single-answer questions, one per option/item/pair otherwise.
    pub fn total_points(&self) -> i32 {
        match self {
            Question::MultipleChoice { .. } | Question::Open { .. } => 1,
            Question::MultipleSelection { options, .. } => options.len() as i32,
            Question::Ordering { sequence, .. } => sequence.len() as i32,
            Question::ConceptRelation { pairs, .. } => pairs.len() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str) -> AnswerOption {
        AnswerOption { id: Uuid::new_v4(), text: text.into() }
    }

    #[test]
    fn discriminator_is_the_type_tag() {
        let question = Question::Ordering {
            id: Uuid::new_v4(),
            title: "Order the planets".into(),
            image_url: None,
            sequence: vec!["Mercury".into(), "Venus".into()],
        };

        let encoded = serde_json::to_value(&question).expect("encode");
        assert_eq!(encoded["type"], "ordering");
        assert_eq!(question.question_type().as_str(), "ordering");
    }

    #[test]
    fn round_trip_preserves_unset_optional_fields() {
        let question = Question::MultipleChoice {
            id: Uuid::new_v4(),
            title: "Capital of France?".into(),
            image_url: None,
            options: vec![option("Paris"), option("Lyon")],
            correct_option: Uuid::new_v4(),
        };

        let encoded = serde_json::to_string(&question).expect("encode");
        let decoded: Question = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, question);
    }

    #[test]
    fn unknown_discriminator_fails_to_decode() {
        let raw = r#"{"type":"essay","id":"2d4d4c17-6d3f-4b44-a24f-7a0e13b45a1d","title":"?"}"#;
        let result: std::result::Result<Question, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn total_points_follows_question_shape() {
        let selection = Question::MultipleSelection {
            id: Uuid::new_v4(),
            title: "Select the noble gases".into(),
            image_url: None,
            options: vec![option("He"), option("O"), option("Ne"), option("N")],
            correct_options: BTreeSet::new(),
        };
        assert_eq!(selection.total_points(), 4);

        let open = Question::Open {
            id: Uuid::new_v4(),
            title: "Explain photosynthesis".into(),
            image_url: None,
        };
        assert_eq!(open.total_points(), 1);
    }
}
