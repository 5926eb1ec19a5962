use crate::models::{Difficulty, Question};

/// Questions tagged with `difficulty`, in their original relative order.
pub fn filter_questions_by_difficulty(
    questions: &[Question],
    difficulty: Difficulty,
) -> Vec<Question> {
    questions
        .iter()
        .filter(|question| question.difficulty == difficulty)
        .cloned()
        .collect()
}
