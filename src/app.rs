use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::data::load_questions_from_csv;
use crate::error::{QuizError, Result};
use crate::models::{AnswerSet, AppState, OPTION_IDS, Question};
use crate::report::ResultReport;
use crate::scoring::{ScoreSummary, score};
use crate::session::{ExamSession, SessionStore};

const NUM_OPTIONS: usize = OPTION_IDS.len();

pub struct App<S: SessionStore> {
    pub state: AppState,
    session: ExamSession<S>,
    source: Option<PathBuf>,
    questions: Vec<Question>,
    current_question_index: usize,
    selected_option: usize,
    answers: AnswerSet,
    summary: Option<ScoreSummary>,
    review_scroll: usize,
    require_all_answered: bool,
    export_dir: PathBuf,
    error: Option<String>,
    notice: Option<String>,
}

impl<S: SessionStore> App<S> {
    pub fn new(session: ExamSession<S>, source: Option<PathBuf>) -> Self {
        Self {
            state: AppState::Upload,
            session,
            source,
            questions: Vec::new(),
            current_question_index: 0,
            selected_option: 0,
            answers: AnswerSet::new(),
            summary: None,
            review_scroll: 0,
            require_all_answered: true,
            export_dir: PathBuf::from("."),
            error: None,
            notice: None,
        }
    }

    pub fn with_require_all_answered(mut self, require: bool) -> Self {
        self.require_all_answered = require;
        self
    }

    pub fn with_export_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn session(&self) -> &ExamSession<S> {
        &self.session
    }

    /// Error shown on the upload screen.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// One-line status message (warnings, export location).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Parses the source file and starts a fresh session with it.
    ///
    /// Load and format failures stay on the upload screen as an error
    /// message; only session storage failures are returned.
    pub fn start_exam(&mut self) -> Result<()> {
        self.error = None;

        let Some(source) = self.source.clone() else {
            self.error = Some("Please choose a CSV file first".to_string());
            return Ok(());
        };

        let questions = match load_questions_from_csv(&source) {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(path = %source.display(), error = %err, "upload rejected");
                self.error = Some(err.to_string());
                return Ok(());
            }
        };

        self.session.start_new()?;
        self.session.save_questions(&questions)?;
        self.answers.clear();
        self.navigate(AppState::Exam)
    }

    /// Moves to `target`, falling back to the upload screen when the session
    /// lacks the data `target` needs.
    pub fn navigate(&mut self, target: AppState) -> Result<()> {
        let questions = self.session.load_questions()?.unwrap_or_default();
        let answers = self.session.load_answers()?;

        let state = target.guard(!questions.is_empty(), answers.is_some());
        match state {
            AppState::Upload => {
                self.questions.clear();
                self.summary = None;
            }
            AppState::Exam => {
                self.questions = questions;
                self.current_question_index = 0;
                self.selected_option = 0;
            }
            AppState::Results | AppState::Review => {
                let answers = answers.unwrap_or_default();
                self.summary = Some(score(&questions, &answers)?);
                self.questions = questions;
                self.answers = answers;
                self.review_scroll = 0;
            }
        }

        self.notice = None;
        self.state = state;
        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.is_answered(q.id))
            .count()
    }

    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty() && self.answered_count() == self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
    }

    /// Records the highlighted option. Multi-answer questions toggle it.
    pub fn choose_option(&mut self) {
        let Some(question) = self.questions.get(self.current_question_index) else {
            return;
        };
        let option_id = OPTION_IDS[self.selected_option];

        if question.is_multi_answer() {
            self.answers.toggle(question.id, option_id);
        } else {
            self.answers.select(question.id, option_id);
        }
        self.notice = None;
    }

    pub fn next_question(&mut self) {
        if self.current_question_index + 1 < self.questions.len() {
            self.go_to_question(self.current_question_index + 1);
        }
    }

    pub fn previous_question(&mut self) {
        if self.current_question_index > 0 {
            self.go_to_question(self.current_question_index - 1);
        }
    }

    pub fn go_to_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.current_question_index = index;
            self.selected_option = 0;
        }
    }

    /// Stores the answers and shows the results.
    ///
    /// Returns `false` when submission is refused because questions are
    /// still unanswered.
    pub fn submit(&mut self) -> Result<bool> {
        if self.require_all_answered && !self.all_answered() {
            let remaining = self.total_questions() - self.answered_count();
            tracing::warn!(remaining, "submission refused");
            self.notice = Some("Please answer all questions before submitting the exam.".to_string());
            return Ok(false);
        }

        self.session.save_answers(&self.answers)?;
        tracing::info!(answered = self.answers.len(), "exam submitted");
        self.navigate(AppState::Results)?;
        Ok(true)
    }

    pub fn summary(&self) -> Option<&ScoreSummary> {
        self.summary.as_ref()
    }

    pub fn open_review(&mut self) -> Result<()> {
        self.navigate(AppState::Review)
    }

    pub fn back_to_results(&mut self) -> Result<()> {
        self.navigate(AppState::Results)
    }

    /// Writes the result report into the export directory.
    ///
    /// A failed write is shown as a notice and yields `None`; the results
    /// screen stays up so the export can be retried.
    pub fn export_results(&mut self) -> Result<Option<PathBuf>> {
        let Some(summary) = &self.summary else {
            return Err(QuizError::MissingSession("no results to export"));
        };

        let report = ResultReport::new(&self.questions, &self.answers, summary, Utc::now());
        match report.write_into(&self.export_dir) {
            Ok(path) => {
                self.notice = Some(format!("Saved {}", path.display()));
                Ok(Some(path))
            }
            Err(err) => {
                tracing::warn!(dir = %self.export_dir.display(), error = %err, "export failed");
                self.notice = Some(format!("Export failed: {err}"));
                Ok(None)
            }
        }
    }

    pub fn review_scroll(&self) -> usize {
        self.review_scroll
    }

    pub fn scroll_review_down(&mut self) {
        let max_scroll = self.questions.len().saturating_sub(1);
        self.review_scroll = (self.review_scroll + 1).min(max_scroll);
    }

    pub fn scroll_review_up(&mut self) {
        self.review_scroll = self.review_scroll.saturating_sub(1);
    }

    /// Clears the session and returns to the upload screen.
    pub fn new_exam(&mut self) -> Result<()> {
        self.session.start_new()?;
        self.answers.clear();
        self.current_question_index = 0;
        self.selected_option = 0;
        self.error = None;
        self.navigate(AppState::Upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;
    use crate::session::MemoryStore;

    const CSV: &str = "question,option_a,option_b,option_c,option_d,correct_answer\n\
        What is 2+2?,3,4,5,6,B\n\
        Capital of France?,London,Berlin,Paris,Madrid,C\n\
        Select prime numbers,1,2,3,4,\"B,C\"\n";

    fn app_with(content: &str, dir: &Path) -> App<MemoryStore> {
        let path = dir.join("exam.csv");
        std::fs::write(&path, content).unwrap();
        App::new(ExamSession::new(MemoryStore::new()), Some(path)).with_export_dir(dir)
    }

    fn answer_current(app: &mut App<MemoryStore>, option: usize) {
        while app.selected_option() != option {
            app.select_next_option();
        }
        app.choose_option();
    }

    #[test]
    fn test_start_exam_loads_questions_into_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path());

        app.start_exam().unwrap();
        assert_eq!(app.state, AppState::Exam);
        assert_eq!(app.total_questions(), 3);
        assert!(app.session().has_questions().unwrap());
        assert!(!app.session().has_answers().unwrap());
    }

    #[test]
    fn test_bad_file_stays_on_upload_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with("question,a,b,c,d,answer\nBroken,1,2\n", dir.path());

        app.start_exam().unwrap();
        assert_eq!(app.state, AppState::Upload);
        assert!(app.error().unwrap().contains("line 2"));
        assert!(!app.session().has_questions().unwrap());
    }

    #[test]
    fn test_guard_without_session_data() {
        let mut app = App::new(ExamSession::new(MemoryStore::new()), None);
        app.navigate(AppState::Results).unwrap();
        assert_eq!(app.state, AppState::Upload);
        app.navigate(AppState::Exam).unwrap();
        assert_eq!(app.state, AppState::Upload);

        app.start_exam().unwrap();
        assert_eq!(app.state, AppState::Upload);
        assert!(app.error().is_some());
    }

    #[test]
    fn test_submit_requires_all_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path());
        app.start_exam().unwrap();

        answer_current(&mut app, 1);
        assert!(!app.submit().unwrap());
        assert_eq!(app.state, AppState::Exam);
        assert!(app.notice().is_some());
        assert!(!app.session().has_answers().unwrap());
    }

    #[test]
    fn test_full_exam_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path());
        app.start_exam().unwrap();

        answer_current(&mut app, 1); // B, correct
        app.next_question();
        answer_current(&mut app, 0); // A, wrong
        app.next_question();
        answer_current(&mut app, 2); // toggle C
        answer_current(&mut app, 1); // toggle B
        assert_eq!(
            app.answers().get(3),
            Some(&Answer::Multiple(vec!["C".to_string(), "B".to_string()]))
        );
        app.next_question();
        assert_eq!(app.current_question_number(), 3);

        assert!(app.submit().unwrap());
        assert_eq!(app.state, AppState::Results);
        let summary = app.summary().unwrap();
        assert_eq!(summary.correct_count, 2);
        assert_eq!(summary.percentage, 67);

        app.open_review().unwrap();
        assert_eq!(app.state, AppState::Review);
        app.scroll_review_down();
        app.scroll_review_down();
        app.scroll_review_down();
        assert_eq!(app.review_scroll(), 2);
        app.back_to_results().unwrap();

        let path = app.export_results().unwrap().unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(path.exists());

        app.new_exam().unwrap();
        assert_eq!(app.state, AppState::Upload);
        assert!(!app.session().has_questions().unwrap());
        assert!(!app.session().has_answers().unwrap());
    }

    #[test]
    fn test_export_failure_keeps_results_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path())
            .with_require_all_answered(false)
            .with_export_dir(dir.path().join("missing"));
        app.start_exam().unwrap();
        answer_current(&mut app, 1);
        app.submit().unwrap();

        assert_eq!(app.export_results().unwrap(), None);
        assert_eq!(app.state, AppState::Results);
        assert!(app.notice().unwrap().starts_with("Export failed"));
        assert!(app.session().has_answers().unwrap());
    }

    #[test]
    fn test_partial_submission_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path()).with_require_all_answered(false);
        app.start_exam().unwrap();

        answer_current(&mut app, 1);
        assert!(app.submit().unwrap());
        assert_eq!(app.summary().unwrap().correct_count, 1);
        assert_eq!(app.summary().unwrap().percentage, 33);
    }

    #[test]
    fn test_question_navigation_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(CSV, dir.path());
        app.start_exam().unwrap();

        app.previous_question();
        assert_eq!(app.current_question_index(), 0);
        app.go_to_question(2);
        app.next_question();
        assert_eq!(app.current_question_index(), 2);

        app.select_previous_option();
        assert_eq!(app.selected_option(), 3);
    }
}
