use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::question::{AnswerOption, ConceptPair};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultipleChoiceGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
    pub correct_option: Uuid,
    pub selected_option: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultipleSelectionGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
    pub options: Vec<AnswerOption>,
    pub correct_options: BTreeSet<Uuid>,
    pub selected_options: BTreeSet<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderingGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
    pub sequence: Vec<String>,
    pub answered_sequence: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConceptRelationGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
    pub pairs: Vec<ConceptPair>,
    pub answered_pairs: Vec<ConceptPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MissingAnswerGrade {
    pub title: String,
    pub question_id: Uuid,
    pub manual_grade: Option<bool>,
    pub question_weight: i32,
}

/// A computed per-question score. Grades carry the data they are recomputed
/// from and are never the system of record; they mirror the question
/// variants plus `missing_answer` for questions the student skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Grade {
    MultipleChoice(MultipleChoiceGrade),
    MultipleSelection(MultipleSelectionGrade),
    Ordering(OrderingGrade),
    ConceptRelation(ConceptRelationGrade),
    Open(OpenGrade),
    MissingAnswer(MissingAnswerGrade),
}

impl Grade {
    pub fn question_id(&self) -> Uuid {
        match self {
            Grade::MultipleChoice(g) => g.question_id,
            Grade::MultipleSelection(g) => g.question_id,
            Grade::Ordering(g) => g.question_id,
            Grade::ConceptRelation(g) => g.question_id,
            Grade::Open(g) => g.question_id,
            Grade::MissingAnswer(g) => g.question_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Grade::MultipleChoice(g) => &g.title,
            Grade::MultipleSelection(g) => &g.title,
            Grade::Ordering(g) => &g.title,
            Grade::ConceptRelation(g) => &g.title,
            Grade::Open(g) => &g.title,
            Grade::MissingAnswer(g) => &g.title,
        }
    }

    pub fn manual_grade(&self) -> Option<bool> {
        match self {
            Grade::MultipleChoice(g) => g.manual_grade,
            Grade::MultipleSelection(g) => g.manual_grade,
            Grade::Ordering(g) => g.manual_grade,
            Grade::ConceptRelation(g) => g.manual_grade,
            Grade::Open(g) => g.manual_grade,
            Grade::MissingAnswer(g) => g.manual_grade,
        }
    }

    /// The stable wire discriminator, identical to the `type` tag serde
    /// writes for this variant.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Grade::MultipleChoice(_) => "multiple_choice",
            Grade::MultipleSelection(_) => "multiple_selection",
            Grade::Ordering(_) => "ordering",
            Grade::ConceptRelation(_) => "concept_relation",
            Grade::Open(_) => "open",
            Grade::MissingAnswer(_) => "missing_answer",
        }
    }

    /// Count of automatically determined correct units.
    ///
    /// Multiple selection counts the question's own options that belong to
    /// the correct set; the submitted selection is not consulted. Ordering
    /// and concept relation count the longest matching prefix, so a leading
    /// mismatch voids every later correct position. A concept relation
    /// marked correct by a grader asserts all of its pairs without
    /// comparing contents.
    pub fn asserts(&self) -> i32 {
        match self {
            Grade::MultipleChoice(g) => {
                if g.selected_option == Some(g.correct_option) {
                    1
                } else {
                    0
                }
            }
            Grade::MultipleSelection(g) => g
                .options
                .iter()
                .filter(|option| g.correct_options.contains(&option.id))
                .count() as i32,
            Grade::Ordering(g) => matching_prefix_len(&g.sequence, &g.answered_sequence) as i32,
            Grade::ConceptRelation(g) => {
                if g.manual_grade == Some(true) {
                    g.pairs.len() as i32
                } else {
                    matching_prefix_len(&g.pairs, &g.answered_pairs) as i32
                }
            }
            Grade::Open(g) => {
                if g.manual_grade == Some(true) {
                    1
                } else {
                    0
                }
            }
            Grade::MissingAnswer(_) => 0,
        }
    }

    /// Point weight of the graded question, derived from its shape.
    pub fn total_points(&self) -> i32 {
        match self {
            Grade::MultipleChoice(_) | Grade::Open(_) => 1,
            Grade::MultipleSelection(g) => g.options.len() as i32,
            Grade::Ordering(g) => g.sequence.len() as i32,
            Grade::ConceptRelation(g) => g.pairs.len() as i32,
            Grade::MissingAnswer(g) => g.question_weight,
        }
    }

    /// A grader's explicit "correct" decision supersedes automatic scoring;
    /// an explicit "incorrect" scores exactly like no decision at all.
    pub fn points(&self) -> i32 {
        if self.manual_grade() == Some(true) {
            self.total_points()
        } else {
            self.asserts()
        }
    }
}

/// Length of the leading run of positions where both lists agree. Counting
/// stops permanently at the first mismatch.
fn matching_prefix_len<T: PartialEq>(expected: &[T], answered: &[T]) -> usize {
    expected
        .iter()
        .zip(answered)
        .take_while(|(expected, answered)| expected == answered)
        .count()
}

/// One student's graded submission: the per-question grades in catalog
/// order and their summed points. Recomputed on demand, never stored as
/// authoritative state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerGrade {
    pub student_id: Uuid,
    pub points: i32,
    pub total_points: i32,
    pub grade_details: Vec<Grade>,
}

impl AnswerGrade {
    pub fn percentage(&self) -> f64 {
        if self.total_points > 0 {
            (self.points as f64 / self.total_points as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn passed(&self, passing_threshold: f64) -> bool {
        self.percentage() >= passing_threshold
    }
}

/// Class-wide aggregate with the same shape as [`AnswerGrade`], without a
/// student identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestGrade {
    pub points: i32,
    pub total_points: i32,
    pub grade_details: Vec<Grade>,
}

impl TestGrade {
    pub fn percentage(&self) -> f64 {
        if self.total_points > 0 {
            (self.points as f64 / self.total_points as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Advisory incompleteness returned alongside a fully populated grade. The
/// caller decides whether to publish provisional scores or wait for the
/// listed decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    MissingManualGrade { question_ids: Vec<Uuid> },
}
