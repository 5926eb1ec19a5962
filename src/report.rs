use std::io::{self, Write};

use crossterm::style::{Color, Stylize};

/// Verdict for one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub number: usize,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Answers compared against the correct ones, question by question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

fn answers_match(user_answer: Option<&str>, correct_answer: &str) -> bool {
    match user_answer {
        Some(answer) => answer.to_lowercase() == correct_answer.to_lowercase(),
        None => false,
    }
}

impl Report {
    /// Compares answers case-insensitively. Only as many questions as there
    /// are user answers are compared.
    pub fn build<'a, I>(user_answers: &[Option<String>], correct_answers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = user_answers
            .iter()
            .zip(correct_answers)
            .enumerate()
            .map(|(index, (user_answer, correct_answer))| {
                ReportEntry {
                    number: index + 1,
                    user_answer: user_answer.clone(),
                    correct_answer: correct_answer.to_string(),
                    is_correct: answers_match(user_answer.as_deref(), correct_answer),
                }
            })
            .collect();

        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn correct(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_correct).count()
    }

    pub fn incorrect(&self) -> usize {
        self.total() - self.correct()
    }

    pub fn percentage(&self) -> f64 {
        calculate_percentage(self.correct(), self.total())
    }

    pub fn render<W: Write>(&self, output: &mut W, color: bool) -> io::Result<()> {
        writeln!(output)?;
        writeln!(output, "--- Quiz Report ---")?;

        for entry in &self.entries {
            let your_answer = entry.user_answer.as_deref().unwrap_or("(no answer)");
            if entry.is_correct {
                writeln!(
                    output,
                    "Question {}: {} (Your answer: {})",
                    entry.number,
                    paint("Correct!", Color::Green, color),
                    your_answer
                )?;
            } else {
                writeln!(
                    output,
                    "Question {}: {} (Your answer: {}, Correct answer: {})",
                    entry.number,
                    paint("Incorrect!", Color::Red, color),
                    your_answer,
                    entry.correct_answer
                )?;
            }
        }

        writeln!(output)?;
        writeln!(output, "Total Questions: {}", self.total())?;
        writeln!(output, "Correct Answers: {}", self.correct())?;
        writeln!(output, "Incorrect Answers: {}", self.incorrect())?;
        Ok(())
    }

    /// Final score line shown once the session is complete.
    pub fn render_score<W: Write>(&self, output: &mut W, color: bool) -> io::Result<()> {
        let percentage = self.percentage();
        let score = format!(
            "Score: {} / {}  ({:.0}%)",
            self.correct(),
            self.total(),
            percentage
        );
        writeln!(output, "{}", paint(&score, get_grade_color(percentage), color))
    }
}

fn paint(text: &str, fg: Color, color: bool) -> String {
    if color {
        text.with(fg).bold().to_string()
    } else {
        text.to_string()
    }
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}
