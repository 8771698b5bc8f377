use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use csv_quiz::config::QuizConfig;
use csv_quiz::logging::{LogTarget, init_logger};
use csv_quiz::{
    ExamSession, FileStore, MemoryStore, Quiz, QuizError, ResultReport, load_questions_from_csv,
    score,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Take the exam in the terminal
    Run {
        /// CSV file to load the questions from
        questions: PathBuf,

        /// Keep the session in memory only
        #[arg(long)]
        ephemeral: bool,
    },
    /// Validate a question file without starting an exam
    Check {
        /// CSV file to validate
        questions: PathBuf,
    },
    /// Print the score of the stored session
    Score,
    /// Write the result report of the stored session
    Export {
        /// Output file (defaults to exam-results-<millis>.json in the export dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Clear the stored session
    Clear,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), QuizError> {
    let config = QuizConfig::load(args.config.as_deref())?;

    let target = match (&args.command, config.logging.file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (Command::Run { .. }, None) => LogTarget::Discard,
        (_, None) => LogTarget::Stderr,
    };
    init_logger(args.verbose, target)?;
    tracing::debug!(?config, "configuration loaded");

    match args.command {
        Command::Run {
            questions,
            ephemeral,
        } => {
            if ephemeral {
                Quiz::new(MemoryStore::new(), Some(questions), &config).run()
            } else {
                Quiz::new(FileStore::new(&config.session.dir), Some(questions), &config).run()
            }
        }
        Command::Check { questions } => check(questions),
        Command::Score => print_score(&config),
        Command::Export { out } => export(&config, out),
        Command::Clear => {
            let mut session = ExamSession::new(FileStore::new(&config.session.dir));
            session.start_new()?;
            println!("Session cleared in {}", session.store().base_path().display());
            Ok(())
        }
    }
}

fn check(path: PathBuf) -> Result<(), QuizError> {
    let questions = load_questions_from_csv(&path)?;

    println!("{}: {} questions", path.display(), questions.len());
    for question in &questions {
        let key = question
            .correct_answer
            .as_ref()
            .map(|key| key.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{:3}. [{}] {} (answer: {})",
            question.id,
            question.kind().label(),
            question.text,
            key
        );
    }
    Ok(())
}

fn stored_session(config: &QuizConfig) -> Result<ResultReport, QuizError> {
    let session = ExamSession::new(FileStore::new(&config.session.dir));
    let questions = session
        .load_questions()?
        .ok_or(QuizError::MissingSession("no questions stored, run an exam first"))?;
    let answers = session
        .load_answers()?
        .ok_or(QuizError::MissingSession("no answers stored, submit the exam first"))?;

    let summary = score(&questions, &answers)?;
    Ok(ResultReport::new(&questions, &answers, &summary, Utc::now()))
}

fn print_score(config: &QuizConfig) -> Result<(), QuizError> {
    let report = stored_session(config)?;
    let summary_grade = csv_quiz::scoring::Grade::from_percentage(report.percentage);

    println!(
        "{} out of {} correct ({}%, {})",
        report.score,
        report.total,
        report.percentage,
        summary_grade.label()
    );
    for (index, entry) in report.questions.iter().enumerate() {
        let mark = if entry.is_correct { "+" } else { "-" };
        println!("  {} {:2}. {}", mark, index + 1, entry.question);
    }
    Ok(())
}

fn export(config: &QuizConfig, out: Option<PathBuf>) -> Result<(), QuizError> {
    let report = stored_session(config)?;
    let path = match out {
        Some(path) => {
            report.write_to(&path)?;
            path
        }
        None => report.write_into(&config.export.dir)?,
    };
    println!("Results written to {}", path.display());
    Ok(())
}
