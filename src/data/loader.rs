use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Question, QuestionKind};

/// Why a question file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error loading questions from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error loading questions from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "Error loading questions from {}: `questions` must be a non-empty list",
        .path.display()
    )]
    NoQuestions { path: PathBuf },
    #[error(
        "Error loading questions from {}: multiple choice question {} has no choices",
        .path.display(),
        .index + 1
    )]
    MissingChoices { path: PathBuf, index: usize },
}

#[derive(Deserialize)]
struct QuestionFile {
    questions: Vec<Question>,
}

/// Loads the full question set, in file order.
///
/// Either every question loads or none do.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_questions(&json_content, path)
}

fn parse_questions(json_content: &str, path: &Path) -> Result<Vec<Question>, LoadError> {
    let file: QuestionFile =
        serde_json::from_str(json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if file.questions.is_empty() {
        return Err(LoadError::NoQuestions {
            path: path.to_path_buf(),
        });
    }

    if let Some(index) = file
        .questions
        .iter()
        .position(|q| q.kind == QuestionKind::MultipleChoice && q.choices.is_empty())
    {
        return Err(LoadError::MissingChoices {
            path: path.to_path_buf(),
            index,
        });
    }

    Ok(file.questions)
}
