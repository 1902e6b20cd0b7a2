use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::grade::{AnswerGrade, Grade};

/// Compact name + score projection for result list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSummary {
    pub student_name: String,
    pub points: i32,
    pub total_points: i32,
    pub percentage: f64,
}

impl GradeSummary {
    pub fn from_answer_grade(student_name: impl Into<String>, grade: &AnswerGrade) -> Self {
        Self {
            student_name: student_name.into(),
            points: grade.points,
            total_points: grade.total_points,
            percentage: grade.percentage(),
        }
    }
}

/// One line of the per-question breakdown in the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedQuestion {
    pub question_id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub points: i32,
    pub total_points: i32,
    pub is_correct: bool,
}

impl GradedQuestion {
    pub fn from_grade(grade: &Grade) -> Self {
        Self {
            question_id: grade.question_id(),
            title: grade.title().to_string(),
            kind: grade.discriminator().to_string(),
            points: grade.points(),
            total_points: grade.total_points(),
            is_correct: grade.points() == grade.total_points(),
        }
    }
}

/// Context a caller supplies for the single-result detail view. The class,
/// professor and test records live outside this crate.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub student_name: String,
    pub class_name: String,
    pub professor_name: String,
    pub test_title: String,
    pub graded_at: DateTime<Utc>,
}

/// Detail projection for a single graded submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub student_name: String,
    pub class_name: String,
    pub professor_name: String,
    pub test_title: String,
    pub graded_at: DateTime<Utc>,
    pub points: i32,
    pub total_points: i32,
    pub percentage: f64,
    pub questions: Vec<GradedQuestion>,
}

impl GradeReport {
    pub fn from_answer_grade(context: ReportContext, grade: &AnswerGrade) -> Self {
        Self {
            student_name: context.student_name,
            class_name: context.class_name,
            professor_name: context.professor_name,
            test_title: context.test_title,
            graded_at: context.graded_at,
            points: grade.points,
            total_points: grade.total_points,
            percentage: grade.percentage(),
            questions: grade.grade_details.iter().map(GradedQuestion::from_grade).collect(),
        }
    }
}
