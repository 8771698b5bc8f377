mod answer;
mod question;

pub use answer::{Answer, AnswerSet};
pub use question::{CorrectAnswer, OPTION_IDS, Question, QuestionKind, QuestionOption};

/// Screens of the exam flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Upload,
    Exam,
    Results,
    Review,
}

impl AppState {
    /// Returns the screen that can actually be shown given what the session
    /// holds. Screens missing their data fall back to `Upload`.
    pub fn guard(self, has_questions: bool, has_answers: bool) -> AppState {
        let allowed = match self {
            AppState::Upload => true,
            AppState::Exam => has_questions,
            AppState::Results | AppState::Review => has_questions && has_answers,
        };

        if allowed {
            self
        } else {
            tracing::warn!(screen = ?self, "missing session data, returning to upload");
            AppState::Upload
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_without_session_data() {
        assert_eq!(AppState::Exam.guard(false, false), AppState::Upload);
        assert_eq!(AppState::Exam.guard(true, false), AppState::Exam);
        assert_eq!(AppState::Results.guard(true, false), AppState::Upload);
        assert_eq!(AppState::Review.guard(false, true), AppState::Upload);
        assert_eq!(AppState::Review.guard(true, true), AppState::Review);
        assert_eq!(AppState::Upload.guard(false, false), AppState::Upload);
    }
}
