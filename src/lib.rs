//! # quiz-runner
//!
//! A terminal quiz runner that survives interruption.
//!
//! Questions are loaded from a JSON file, filtered by difficulty and
//! shuffled, then asked one at a time with an advisory countdown. Every
//! answer is saved straight away, so a run that is cut short resumes where
//! it stopped. A cumulative report is printed after each answer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{QuizConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quiz_runner::QuizError> {
//!     let input = tokio::io::BufReader::new(tokio::io::stdin());
//!     let mut session = Session::new(QuizConfig::default(), input, std::io::stdout());
//!     session.run().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod data;
mod models;
mod report;
mod runner;
mod session;
pub mod terminal;

use std::io;

use thiserror::Error;

pub use config::{DEFAULT_PROGRESS_PATH, DEFAULT_QUESTION_TIMER, DEFAULT_QUESTIONS_PATH, QuizConfig};
pub use data::{
    LoadError, PersistError, ProgressStore, filter_questions_by_difficulty,
    load_questions_from_json,
};
pub use models::{Difficulty, Progress, Question, QuestionKind, fingerprint};
pub use report::{Report, ReportEntry};
pub use runner::{Asked, ask_question, is_valid_answer, parse_true_false};
pub use session::{Session, SessionOutcome};

/// Error type for quiz operations. Each variant ends the session.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Invalid difficulty level: {0:?} (expected starter or advanced)")]
    InvalidDifficulty(String),
    #[error("Invalid question type: {0:?}")]
    InvalidQuestionType(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl QuizError {
    /// Process exit code for this error. Zero is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuizError::Io(_) => 1,
            QuizError::Load(_) => 2,
            QuizError::InvalidDifficulty(_) => 3,
            QuizError::InvalidQuestionType(_) => 4,
            QuizError::Persist(_) => 5,
        }
    }
}
