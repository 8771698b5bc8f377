use serde::{Deserialize, Serialize};

/// Ids of the four option columns, in column order.
pub const OPTION_IDS: [&str; 4] = ["A", "B", "C", "D"];

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

/// Whether a question expects one option or a set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    SingleAnswer,
    #[serde(rename = "MSQ")]
    MultiAnswer,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::SingleAnswer => "MCQ",
            QuestionKind::MultiAnswer => "MSQ",
        }
    }
}

/// The answer key of a question.
///
/// Serialized untagged, so a single id is a plain string and several ids
/// are a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// Builds the answer key from cleaned tokens. No tokens means no key.
    pub fn from_tokens(mut tokens: Vec<String>) -> Option<Self> {
        match tokens.len() {
            0 => None,
            1 => tokens.pop().map(CorrectAnswer::Single),
            _ => Some(CorrectAnswer::Multiple(tokens)),
        }
    }

    pub fn ids(&self) -> &[String] {
        match self {
            CorrectAnswer::Single(id) => std::slice::from_ref(id),
            CorrectAnswer::Multiple(ids) => ids,
        }
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.ids().iter().any(|id| id == option_id)
    }
}

impl std::fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ids().join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 1-based data row index, header excluded.
    pub id: usize,
    #[serde(rename = "question")]
    pub text: String,
    pub options: [QuestionOption; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<CorrectAnswer>,
}

impl Question {
    pub fn new(id: usize, text: String, option_texts: [String; 4]) -> Self {
        let [a, b, c, d] = option_texts;
        let option = |id: &str, text: String| QuestionOption {
            id: id.to_string(),
            text,
        };

        Self {
            id,
            text,
            options: [
                option(OPTION_IDS[0], a),
                option(OPTION_IDS[1], b),
                option(OPTION_IDS[2], c),
                option(OPTION_IDS[3], d),
            ],
            correct_answer: None,
        }
    }

    pub fn with_correct_answer(mut self, correct_answer: Option<CorrectAnswer>) -> Self {
        self.correct_answer = correct_answer;
        self
    }

    pub fn kind(&self) -> QuestionKind {
        match self.correct_answer {
            Some(CorrectAnswer::Multiple(_)) => QuestionKind::MultiAnswer,
            _ => QuestionKind::SingleAnswer,
        }
    }

    pub fn is_multi_answer(&self) -> bool {
        self.kind() == QuestionKind::MultiAnswer
    }
}
