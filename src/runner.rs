use std::io::{self, Write};
use std::time::Duration;

use tokio::io::AsyncBufRead;

use crate::QuizError;
use crate::models::{Question, QuestionKind};
use crate::terminal::{self, Countdown, Line};

/// What came of presenting one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asked {
    /// The answer to record.
    Answered(String),
    /// Input did not fit the question; ask again on the next pass.
    Rejected,
    /// Input ended or the user pressed Ctrl-C.
    Suspended,
}

/// Whether `answer` is a 1-based index into `choices`.
pub fn is_valid_answer(choices: &[String], answer: &str) -> bool {
    if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match answer.parse::<usize>() {
        Ok(number) => (1..=choices.len()).contains(&number),
        Err(_) => false,
    }
}

/// Lowercased `t` or `f`, or `None` for anything else.
pub fn parse_true_false(answer: &str) -> Option<String> {
    let answer = answer.trim().to_lowercase();
    match answer.as_str() {
        "t" | "f" => Some(answer),
        _ => None,
    }
}

fn prompt_for(kind: &QuestionKind) -> Result<&'static str, QuizError> {
    match kind {
        QuestionKind::MultipleChoice => Ok("Your answer (choose by number): "),
        QuestionKind::TrueFalse => Ok("True or False (t/f): "),
        QuestionKind::FillInTheBlank => Ok("Your answer: "),
        QuestionKind::Other(name) => Err(QuizError::InvalidQuestionType(name.clone())),
    }
}

fn interpret(question: &Question, line: String) -> Result<Option<String>, QuizError> {
    match &question.kind {
        QuestionKind::MultipleChoice => {
            let selection = line.trim();
            if !is_valid_answer(&question.choices, selection) {
                return Ok(None);
            }
            Ok(selection
                .parse::<usize>()
                .ok()
                .and_then(|number| question.choices.get(number - 1))
                .cloned())
        }
        QuestionKind::TrueFalse => Ok(parse_true_false(&line)),
        QuestionKind::FillInTheBlank => Ok(Some(line)),
        QuestionKind::Other(name) => Err(QuizError::InvalidQuestionType(name.clone())),
    }
}

/// Presents `question` and waits for one line of input.
///
/// The countdown only draws; input is never cut off. It is stopped before
/// this returns on every path.
pub async fn ask_question<R, W>(
    question: &Question,
    timer: Duration,
    input: &mut R,
    output: &mut W,
) -> Result<Asked, QuizError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let prompt = prompt_for(&question.kind)?;

    writeln!(output)?;
    writeln!(output, "{}", question.text)?;
    if question.kind == QuestionKind::MultipleChoice {
        for (index, choice) in question.choices.iter().enumerate() {
            writeln!(output, "{}. {}", index + 1, choice)?;
        }
    }
    if !timer.is_zero() {
        // reserved for the countdown
        writeln!(output)?;
    }
    write!(output, "{}", prompt)?;
    output.flush()?;

    let countdown = Countdown::start(timer, io::stdout());
    let line = terminal::read_line(input).await;
    if let Some(countdown) = countdown {
        countdown.stop().await;
    }

    let line = match line? {
        Line::Text(line) => line,
        Line::Eof | Line::Interrupted => {
            writeln!(output)?;
            return Ok(Asked::Suspended);
        }
    };

    match interpret(question, line)? {
        Some(answer) => Ok(Asked::Answered(answer)),
        None => {
            writeln!(output, "Invalid answer, this question will be asked again.")?;
            Ok(Asked::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::Difficulty;

    fn choices(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn question(kind: QuestionKind, choices: Vec<String>, correct: &str) -> Question {
        Question {
            text: "Question?".to_string(),
            kind,
            choices,
            correct_answer: correct.to_string(),
            difficulty: Difficulty::Starter,
        }
    }

    async fn ask(question: &Question, input: &str) -> (Result<Asked, QuizError>, String) {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        let asked = ask_question(question, Duration::ZERO, &mut input, &mut output).await;
        (asked, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_is_valid_answer() {
        let abc = choices(&["A", "B", "C"]);
        assert!(is_valid_answer(&abc, "1"));
        assert!(is_valid_answer(&abc, "3"));
        assert!(!is_valid_answer(&abc, "0"));
        assert!(!is_valid_answer(&abc, "4"));
        assert!(!is_valid_answer(&abc, ""));
        assert!(!is_valid_answer(&abc, "b"));
        assert!(!is_valid_answer(&abc, "-1"));
        assert!(!is_valid_answer(&abc, "+2"));
        assert!(!is_valid_answer(&abc, " 2"));
        assert!(!is_valid_answer(&abc, "1.0"));
        assert!(!is_valid_answer(&abc, "99999999999999999999999"));
        assert!(!is_valid_answer(&[], "1"));
    }

    #[test]
    fn test_parse_true_false() {
        assert_eq!(parse_true_false("t"), Some("t".to_string()));
        assert_eq!(parse_true_false("F"), Some("f".to_string()));
        assert_eq!(parse_true_false(" T "), Some("t".to_string()));
        assert_eq!(parse_true_false("true"), None);
        assert_eq!(parse_true_false(""), None);
    }

    #[tokio::test]
    async fn test_multiple_choice_records_choice_text() {
        let q = question(QuestionKind::MultipleChoice, choices(&["A", "B", "C"]), "B");
        let (asked, output) = ask(&q, "2\n").await;
        assert_eq!(asked.unwrap(), Asked::Answered("B".to_string()));
        assert!(output.contains("1. A\n2. B\n3. C\n"));
        assert!(output.contains("Your answer (choose by number): "));
    }

    #[tokio::test]
    async fn test_multiple_choice_out_of_range_is_rejected() {
        let q = question(QuestionKind::MultipleChoice, choices(&["A", "B"]), "A");
        let (asked, output) = ask(&q, "5\n").await;
        assert_eq!(asked.unwrap(), Asked::Rejected);
        assert!(output.contains("asked again"));
    }

    #[tokio::test]
    async fn test_true_false() {
        let q = question(QuestionKind::TrueFalse, Vec::new(), "t");
        assert_eq!(ask(&q, "T\n").await.0.unwrap(), Asked::Answered("t".to_string()));
        assert_eq!(ask(&q, "yes\n").await.0.unwrap(), Asked::Rejected);
    }

    #[tokio::test]
    async fn test_fill_in_the_blank_is_verbatim() {
        let q = question(QuestionKind::FillInTheBlank, Vec::new(), "42");
        assert_eq!(
            ask(&q, " forty two \n").await.0.unwrap(),
            Asked::Answered(" forty two ".to_string())
        );
        assert_eq!(ask(&q, "\n").await.0.unwrap(), Asked::Answered(String::new()));
    }

    #[tokio::test]
    async fn test_end_of_input_suspends() {
        let q = question(QuestionKind::FillInTheBlank, Vec::new(), "42");
        assert_eq!(ask(&q, "").await.0.unwrap(), Asked::Suspended);
    }

    #[tokio::test]
    async fn test_unknown_type_is_fatal() {
        let q = question(QuestionKind::Other("essay".to_string()), Vec::new(), "x");
        let (asked, output) = ask(&q, "anything\n").await;
        assert!(matches!(asked, Err(QuizError::InvalidQuestionType(name)) if name == "essay"));
        assert!(output.is_empty());
    }
}
