use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::question::ConceptPair;

/// A student's submitted response to one question. Variants mirror the
/// question variants and share their wire discriminators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionAnswer {
    MultipleChoice {
        question_id: Uuid,
        selected_option: Option<Uuid>,
    },
    MultipleSelection {
        question_id: Uuid,
        selected_options: BTreeSet<Uuid>,
    },
    Ordering {
        question_id: Uuid,
        answered_sequence: Vec<String>,
    },
    ConceptRelation {
        question_id: Uuid,
        answered_pairs: Vec<ConceptPair>,
    },
    Open {
        question_id: Uuid,
        text: String,
    },
}

impl QuestionAnswer {
    pub fn question_id(&self) -> Uuid {
        match self {
            QuestionAnswer::MultipleChoice { question_id, .. }
            | QuestionAnswer::MultipleSelection { question_id, .. }
            | QuestionAnswer::Ordering { question_id, .. }
            | QuestionAnswer::ConceptRelation { question_id, .. }
            | QuestionAnswer::Open { question_id, .. } => *question_id,
        }
    }
}

/// Grader-side state attached to a submission: the flat set of question ids
/// a human has marked correct, overriding automatic scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerMetadata {
    pub manual_mark_as_correct: BTreeSet<Uuid>,
}

impl AnswerMetadata {
    /// Resolves the override for one question. A marked id grades as fully
    /// correct; an unmarked id leaves automatic scoring in charge. No
    /// explicit "marked incorrect" state exists at this layer.
    pub fn manual_grade_for(&self, question_id: Uuid) -> Option<bool> {
        if self.manual_mark_as_correct.contains(&question_id) {
            Some(true)
        } else {
            None
        }
    }
}
