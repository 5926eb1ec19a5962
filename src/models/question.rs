use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty tag carried by every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Starter,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Starter => "starter",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Parses user input case-insensitively. Nothing else is tolerated.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "starter" => Ok(Difficulty::Starter),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(other.to_string()),
        }
    }
}

/// How a question is presented and answered.
///
/// Unknown type names are kept as `Other` so a question set still loads;
/// the runner rejects them when the question comes up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillInTheBlank,
    Other(String),
}

impl From<String> for QuestionKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "multiple_choice" => QuestionKind::MultipleChoice,
            "true_false" => QuestionKind::TrueFalse,
            "fill_in_the_blank" => QuestionKind::FillInTheBlank,
            _ => QuestionKind::Other(name),
        }
    }
}

impl From<QuestionKind> for String {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::MultipleChoice => "multiple_choice".to_string(),
            QuestionKind::TrueFalse => "true_false".to_string(),
            QuestionKind::FillInTheBlank => "fill_in_the_blank".to_string(),
            QuestionKind::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Only meaningful for multiple choice questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub correct_answer: String,
    pub difficulty: Difficulty,
}
