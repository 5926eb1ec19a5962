use std::path::PathBuf;
use std::time::Duration;

use crate::models::Difficulty;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";
pub const DEFAULT_PROGRESS_PATH: &str = "quiz_progress.json";
pub const DEFAULT_QUESTION_TIMER: Duration = Duration::from_secs(3);

/// Settings for one quiz session.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub questions_path: PathBuf,
    pub progress_path: PathBuf,
    /// Advisory time budget per question. Zero disables the countdown.
    pub question_timer: Duration,
    /// Skips the difficulty prompt when set.
    pub difficulty: Option<Difficulty>,
    /// Fixed seed for the question shuffle.
    pub seed: Option<u64>,
    pub color: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_PATH),
            question_timer: DEFAULT_QUESTION_TIMER,
            difficulty: None,
            seed: None,
            color: true,
        }
    }
}
