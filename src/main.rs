use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use quiz_runner::{
    DEFAULT_PROGRESS_PATH, DEFAULT_QUESTIONS_PATH, Difficulty, QuizConfig, Session, SessionOutcome,
};
use tokio::io::BufReader;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Starter,
    Advanced,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Starter => Difficulty::Starter,
            DifficultyArg::Advanced => Difficulty::Advanced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// File that keeps answers between runs
    #[arg(short, long, default_value = DEFAULT_PROGRESS_PATH)]
    progress: PathBuf,

    /// Seconds shown on the countdown for each question (0 hides it)
    #[arg(short, long, default_value_t = 3)]
    timer: u64,

    /// Difficulty to play; asked interactively when omitted
    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Seed for the question shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> QuizConfig {
        QuizConfig {
            questions_path: self.questions,
            progress_path: self.progress,
            question_timer: Duration::from_secs(self.timer),
            difficulty: self.difficulty.map(Difficulty::from),
            seed: self.seed,
            color: !self.no_color,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = args.into_config();
    let color = config.color;
    let input = BufReader::new(tokio::io::stdin());
    let mut session = Session::new(config, input, io::stdout());

    let code = match session.run().await {
        Ok(SessionOutcome::Completed(report)) => {
            println!();
            println!("Quiz complete!");
            if let Err(e) = report.render_score(&mut io::stdout(), color) {
                log::warn!("could not print score: {}", e);
            }
            0
        }
        Ok(SessionOutcome::Suspended { .. }) => 0,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    };

    // Exit explicitly: a pending blocking stdin read would otherwise hold
    // the runtime open on shutdown.
    std::process::exit(code);
}
