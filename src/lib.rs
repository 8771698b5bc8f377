//! # csv-quiz
//!
//! Multiple-choice exams from CSV files, taken in the terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use csv_quiz::{AnswerSet, QuizError, parse_questions, score};
//!
//! fn main() -> Result<(), QuizError> {
//!     let csv = "question,a,b,c,d,answer\nWhat is 2+2?,3,4,5,6,B\n";
//!     let questions = parse_questions(csv)?;
//!
//!     let mut answers = AnswerSet::new();
//!     answers.select(questions[0].id, "B");
//!
//!     let summary = score(&questions, &answers)?;
//!     println!("{}%", summary.percentage);
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
mod error;
pub mod logging;
mod models;
pub mod report;
pub mod scoring;
pub mod session;
pub mod terminal;
mod ui;

use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{FormatError, LoadError, MIN_COLUMNS, load_questions_from_csv, parse_questions};
pub use error::{QuizError, Result};
pub use models::{
    Answer, AnswerSet, AppState, CorrectAnswer, OPTION_IDS, Question, QuestionKind,
    QuestionOption,
};
pub use report::ResultReport;
pub use scoring::{ScoreSummary, is_correct, score};
pub use session::{ExamSession, FileStore, MemoryStore, SessionStore};

use config::QuizConfig;

/// An exam that can be taken in the terminal.
pub struct Quiz<S: SessionStore> {
    app: App<S>,
}

impl<S: SessionStore> Quiz<S> {
    /// Create an exam over `store` for the CSV file at `source`.
    pub fn new(store: S, source: Option<PathBuf>, config: &QuizConfig) -> Self {
        let app = App::new(ExamSession::new(store), source)
            .with_require_all_answered(config.exam.require_all_answered)
            .with_export_dir(config.export.dir.clone());
        Self { app }
    }

    /// Run the exam in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub fn run(mut self) -> Result<()> {
        let mut screen = terminal::ExamScreen::enter()?;
        run_event_loop(screen.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App<S> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<S> {
        &mut self.app
    }
}

fn run_event_loop<S: SessionStore>(
    terminal: &mut terminal::ExamTerminal,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code)? {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> Result<bool> {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return Ok(true);
    }

    match app.state {
        AppState::Upload => handle_upload_input(app, key)?,
        AppState::Exam => handle_exam_input(app, key)?,
        AppState::Results => handle_results_input(app, key)?,
        AppState::Review => handle_review_input(app, key)?,
    }
    Ok(false)
}

fn handle_upload_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> Result<()> {
    if key == KeyCode::Enter {
        app.start_exam()?;
    }
    Ok(())
}

fn handle_exam_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.submit()?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_results_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Char('v') | KeyCode::Char('V') => app.open_review()?,
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.export_results()?;
        }
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_exam()?,
        _ => {}
    }
    Ok(())
}

fn handle_review_input<S: SessionStore>(app: &mut App<S>, key: KeyCode) -> Result<()> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_review_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_review_up(),
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => app.back_to_results()?,
        _ => {}
    }
    Ok(())
}
