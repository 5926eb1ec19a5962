use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::io::AsyncBufRead;

use crate::QuizError;
use crate::config::QuizConfig;
use crate::data::{ProgressStore, filter_questions_by_difficulty, load_questions_from_json};
use crate::models::{Difficulty, Progress, Question, fingerprint};
use crate::report::Report;
use crate::runner::{Asked, ask_question};
use crate::terminal::{self, Line};

/// How a session ended without a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Every question was answered; saved progress has been removed.
    Completed(Report),
    /// Input ended early; answers so far are saved for the next run.
    Suspended { answered: usize, total: usize },
}

/// One run of the quiz over a console.
pub struct Session<R, W> {
    config: QuizConfig,
    store: ProgressStore,
    progress: Progress,
    /// Whether the progress file on disk belongs to this session's
    /// question set, either resumed or written by this run.
    owns_saved_progress: bool,
    input: R,
    output: W,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(config: QuizConfig, input: R, output: W) -> Self {
        let store = ProgressStore::new(config.progress_path.clone());
        Self {
            config,
            store,
            progress: Progress::default(),
            owns_saved_progress: false,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the quiz to completion, suspension or failure.
    ///
    /// Unfinished progress is written back on every exit path.
    pub async fn run(&mut self) -> Result<SessionOutcome, QuizError> {
        let result = self.run_quiz().await;

        let completed = matches!(result, Ok(SessionOutcome::Completed(_)));
        let persisted = if completed || self.progress.is_empty() {
            Ok(())
        } else {
            self.store.save(&self.progress)
        };

        match (result, persisted) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(err)) => Err(err.into()),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(persist_err)) => {
                log::error!("could not save progress: {}", persist_err);
                Err(err)
            }
        }
    }

    async fn run_quiz(&mut self) -> Result<SessionOutcome, QuizError> {
        let questions = load_questions_from_json(&self.config.questions_path)?;
        log::info!(
            "loaded {} questions from {}",
            questions.len(),
            self.config.questions_path.display()
        );

        self.progress = self.store.load();

        let difficulty = match self.config.difficulty {
            Some(difficulty) => difficulty,
            None => self.prompt_difficulty().await?,
        };

        let filtered = filter_questions_by_difficulty(&questions, difficulty);
        let questions = self.arrange(difficulty, filtered)?;
        let total = questions.len();

        if total == 0 {
            writeln!(self.output, "No {} questions available.", difficulty)?;
        }

        while self.progress.answered() < total {
            let question = &questions[self.progress.answered()];
            let asked = ask_question(
                question,
                self.config.question_timer,
                &mut self.input,
                &mut self.output,
            )
            .await?;

            match asked {
                Asked::Answered(answer) => {
                    self.progress.record(answer);
                    self.store.save(&self.progress)?;
                    self.owns_saved_progress = true;
                    build_report(&self.progress, &questions)
                        .render(&mut self.output, self.config.color)?;
                }
                Asked::Rejected => {}
                Asked::Suspended => {
                    let answered = self.progress.answered();
                    writeln!(
                        self.output,
                        "Quiz paused with {}/{} answered. Run again to resume.",
                        answered, total
                    )?;
                    return Ok(SessionOutcome::Suspended { answered, total });
                }
            }
        }

        let report = build_report(&self.progress, &questions);
        if self.owns_saved_progress {
            self.store.clear()?;
        } else if self.store.path().exists() {
            log::info!(
                "leaving progress in {} for its own question set",
                self.store.path().display()
            );
        }
        self.progress.reset();
        Ok(SessionOutcome::Completed(report))
    }

    async fn prompt_difficulty(&mut self) -> Result<Difficulty, QuizError> {
        write!(self.output, "Choose difficulty (starter/advanced): ")?;
        self.output.flush()?;

        match terminal::read_line(&mut self.input).await? {
            Line::Text(choice) => choice.parse().map_err(QuizError::InvalidDifficulty),
            Line::Eof | Line::Interrupted => Err(QuizError::InvalidDifficulty(String::new())),
        }
    }

    /// Puts the filtered questions in presentation order, resuming the
    /// saved order when the saved progress belongs to this question set.
    fn arrange(
        &mut self,
        difficulty: Difficulty,
        filtered: Vec<Question>,
    ) -> Result<Vec<Question>, QuizError> {
        let fingerprint = fingerprint(difficulty, &filtered);

        if self.progress.matches(&fingerprint, filtered.len()) {
            self.owns_saved_progress = true;
            if !self.progress.is_empty() {
                log::info!(
                    "resuming with {} of {} questions answered",
                    self.progress.answered(),
                    filtered.len()
                );
                writeln!(
                    self.output,
                    "Resuming: {} of {} questions already answered.",
                    self.progress.answered(),
                    filtered.len()
                )?;
            }
        } else {
            if !self.progress.is_empty() {
                log::warn!(
                    "saved progress in {} does not match the {} question set, starting over",
                    self.store.path().display(),
                    difficulty
                );
                writeln!(
                    self.output,
                    "Saved progress is for a different question set; starting over."
                )?;
            }
            let order = shuffled_order(filtered.len(), self.config.seed);
            self.progress = Progress::new(fingerprint, order);
        }

        let mut slots: Vec<Option<Question>> = filtered.into_iter().map(Some).collect();
        Ok(self
            .progress
            .order
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect())
    }
}

fn build_report(progress: &Progress, questions: &[Question]) -> Report {
    Report::build(
        &progress.user_answers,
        questions.iter().map(|q| q.correct_answer.as_str()),
    )
}

fn shuffled_order(len: usize, seed: Option<u64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    match seed {
        Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => order.shuffle(&mut rand::rng()),
    }
    order
}
