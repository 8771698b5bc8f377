use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user's selection for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    pub fn ids(&self) -> &[String] {
        match self {
            Answer::Single(id) => std::slice::from_ref(id),
            Answer::Multiple(ids) => ids,
        }
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.ids().iter().any(|id| id == option_id)
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids().join(", "))
    }
}

/// Answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: usize) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// Records `option_id` as the only selection for a single-answer question.
    pub fn select(&mut self, question_id: usize, option_id: &str) {
        self.answers
            .insert(question_id, Answer::Single(option_id.to_string()));
    }

    /// Adds or removes `option_id` from a multi-answer selection.
    ///
    /// Removing the last id leaves the question unanswered.
    pub fn toggle(&mut self, question_id: usize, option_id: &str) {
        let mut ids = match self.answers.remove(&question_id) {
            Some(Answer::Multiple(ids)) => ids,
            Some(Answer::Single(id)) => vec![id],
            None => Vec::new(),
        };

        if let Some(pos) = ids.iter().position(|id| id == option_id) {
            ids.remove(pos);
        } else {
            ids.push(option_id.to_string());
        }

        if !ids.is_empty() {
            self.answers.insert(question_id, Answer::Multiple(ids));
        }
    }

    pub fn is_answered(&self, question_id: usize) -> bool {
        self.answers.contains_key(&question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}

impl FromIterator<(usize, Answer)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (usize, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
