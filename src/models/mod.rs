mod progress;
mod question;

pub use progress::{Progress, fingerprint};
pub use question::{Difficulty, Question, QuestionKind};
