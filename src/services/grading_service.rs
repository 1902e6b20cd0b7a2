use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::answer::{AnswerMetadata, QuestionAnswer};
use crate::models::grade::{
    AnswerGrade, ConceptRelationGrade, Grade, GradeError, MissingAnswerGrade,
    MultipleChoiceGrade, MultipleSelectionGrade, OpenGrade, OrderingGrade, TestGrade,
};
use crate::models::question::Question;

/// Pure, synchronous grading. Every call reads immutable inputs and
/// allocates fresh output, so different students may be graded
/// concurrently without coordination.
pub struct GradingService;

impl GradingService {
    /// Grades one question against the student's submitted answer, if any.
    ///
    /// Inputs are assumed structurally valid (option ids exist, answer
    /// shapes mirror their questions); a violated assumption is a fatal
    /// error, not a zero score.
    pub fn grade(
        question: &Question,
        answer: Option<&QuestionAnswer>,
        manual_grade: Option<bool>,
    ) -> Result<Grade> {
        let Some(answer) = answer else {
            return Ok(Grade::MissingAnswer(MissingAnswerGrade {
                title: question.title().to_string(),
                question_id: question.id(),
                manual_grade,
                question_weight: question.total_points(),
            }));
        };

        let grade = match (question, answer) {
            (
                Question::MultipleChoice { id, title, correct_option, .. },
                QuestionAnswer::MultipleChoice { selected_option, .. },
            ) => Grade::MultipleChoice(MultipleChoiceGrade {
                title: title.clone(),
                question_id: *id,
                manual_grade,
                correct_option: *correct_option,
                selected_option: *selected_option,
            }),
            (
                Question::MultipleSelection { id, title, options, correct_options, .. },
                QuestionAnswer::MultipleSelection { selected_options, .. },
            ) => Grade::MultipleSelection(MultipleSelectionGrade {
                title: title.clone(),
                question_id: *id,
                manual_grade,
                options: options.clone(),
                correct_options: correct_options.clone(),
                selected_options: selected_options.clone(),
            }),
            (
                Question::Ordering { id, title, sequence, .. },
                QuestionAnswer::Ordering { answered_sequence, .. },
            ) => {
                if sequence.len() != answered_sequence.len() {
                    return Err(Error::SequenceLengthMismatch {
                        question_id: *id,
                        expected: sequence.len(),
                        answered: answered_sequence.len(),
                    });
                }
                Grade::Ordering(OrderingGrade {
                    title: title.clone(),
                    question_id: *id,
                    manual_grade,
                    sequence: sequence.clone(),
                    answered_sequence: answered_sequence.clone(),
                })
            }
            (
                Question::ConceptRelation { id, title, pairs, .. },
                QuestionAnswer::ConceptRelation { answered_pairs, .. },
            ) => {
                if pairs.len() != answered_pairs.len() {
                    return Err(Error::SequenceLengthMismatch {
                        question_id: *id,
                        expected: pairs.len(),
                        answered: answered_pairs.len(),
                    });
                }
                Grade::ConceptRelation(ConceptRelationGrade {
                    title: title.clone(),
                    question_id: *id,
                    manual_grade,
                    pairs: pairs.clone(),
                    answered_pairs: answered_pairs.clone(),
                })
            }
            (Question::Open { id, title, .. }, QuestionAnswer::Open { .. }) => {
                Grade::Open(OpenGrade {
                    title: title.clone(),
                    question_id: *id,
                    manual_grade,
                })
            }
            _ => return Err(Error::AnswerTypeMismatch { question_id: question.id() }),
        };

        Ok(grade)
    }

    /// Grades one student's submission against the full catalog, in catalog
    /// order.
    ///
    /// The grade is always fully populated; open questions still awaiting a
    /// grader contribute zero provisional points and are reported in the
    /// advisory [`GradeError`] so the caller can gate publication on it.
    pub fn grade_answer(
        student_id: Uuid,
        questions: &[Question],
        answers: &[QuestionAnswer],
        metadata: &AnswerMetadata,
    ) -> Result<(AnswerGrade, Option<GradeError>)> {
        let mut grade_details = Vec::with_capacity(questions.len());

        for question in questions {
            let answer = answers.iter().find(|a| a.question_id() == question.id());
            let manual_grade = metadata.manual_grade_for(question.id());
            grade_details.push(Self::grade(question, answer, manual_grade)?);
        }

        let points = grade_details.iter().map(Grade::points).sum();
        let total_points = grade_details.iter().map(Grade::total_points).sum();

        let pending: Vec<Uuid> = grade_details
            .iter()
            .filter(|grade| matches!(grade, Grade::Open(_)) && grade.manual_grade().is_none())
            .map(Grade::question_id)
            .collect();

        let error = if pending.is_empty() {
            None
        } else {
            warn!(
                student_id = %student_id,
                pending = ?pending,
                "open answers awaiting manual grading"
            );
            Some(GradeError::MissingManualGrade { question_ids: pending })
        };

        debug!(student_id = %student_id, points, total_points, "graded answer");

        Ok((
            AnswerGrade { student_id, points, total_points, grade_details },
            error,
        ))
    }

    /// Folds per-student grades into the class-wide aggregate, preserving
    /// input order.
    pub fn grade_test(answer_grades: &[AnswerGrade]) -> TestGrade {
        let mut points = 0;
        let mut total_points = 0;
        let mut grade_details = Vec::new();

        for grade in answer_grades {
            points += grade.points;
            total_points += grade.total_points;
            grade_details.extend(grade.grade_details.iter().cloned());
        }

        TestGrade { points, total_points, grade_details }
    }
}
