//! Exam session state.
//!
//! The question list and the submitted answers are handed between screens
//! through an [`ExamSession`], which serializes them to JSON in a
//! [`SessionStore`]. Swapping the store changes where the session lives
//! without touching the screens.

mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use store::{FileStore, MemoryStore, SessionStore};

use crate::models::{AnswerSet, Question};

/// Key holding the parsed question list.
pub const QUESTIONS_KEY: &str = "examQuestions";
/// Key holding the submitted answers.
pub const ANSWERS_KEY: &str = "examAnswers";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt session value for {key}: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub struct ExamSession<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> ExamSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Clears both keys so a fresh exam can begin.
    pub fn start_new(&mut self) -> Result<(), SessionError> {
        self.store.clear(QUESTIONS_KEY)?;
        self.store.clear(ANSWERS_KEY)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    pub fn save_questions(&mut self, questions: &[Question]) -> Result<(), SessionError> {
        let value = to_json(QUESTIONS_KEY, &questions)?;
        self.store.save(QUESTIONS_KEY, &value)
    }

    pub fn load_questions(&self) -> Result<Option<Vec<Question>>, SessionError> {
        self.load_json(QUESTIONS_KEY)
    }

    pub fn save_answers(&mut self, answers: &AnswerSet) -> Result<(), SessionError> {
        let value = to_json(ANSWERS_KEY, answers)?;
        self.store.save(ANSWERS_KEY, &value)
    }

    pub fn load_answers(&self) -> Result<Option<AnswerSet>, SessionError> {
        self.load_json(ANSWERS_KEY)
    }

    pub fn has_questions(&self) -> Result<bool, SessionError> {
        Ok(self.store.load(QUESTIONS_KEY)?.is_some())
    }

    pub fn has_answers(&self) -> Result<bool, SessionError> {
        Ok(self.store.load(ANSWERS_KEY)?.is_some())
    }

    fn load_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, SessionError> {
        let Some(raw) = self.store.load(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| SessionError::Corrupt { key, source })
    }
}

fn to_json<T: serde::Serialize + ?Sized>(key: &'static str, value: &T) -> Result<String, SessionError> {
    serde_json::to_string(value).map_err(|source| SessionError::Corrupt { key, source })
}
