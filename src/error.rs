use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The answer's sequence or pair list does not match the question's
    /// length. Structural validation runs before grading, so this signals a
    /// broken upstream pipeline rather than bad user input.
    #[error("Sequence length mismatch for question {question_id}: question defines {expected} items, answer carries {answered}")]
    SequenceLengthMismatch {
        question_id: Uuid,
        expected: usize,
        answered: usize,
    },

    #[error("Answer type mismatch for question {question_id}: submitted answer does not mirror the question variant")]
    AnswerTypeMismatch { question_id: Uuid },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
