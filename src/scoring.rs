//! Answer matching and score aggregation.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Answer, AnswerSet, CorrectAnswer, Question};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("cannot score an exam with no questions")]
    NoQuestions,
}

/// Correctness of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub question_id: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Grade {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80.. => Grade::Excellent,
            60..=79 => Grade::Good,
            40..=59 => Grade::Fair,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total: usize,
    pub percentage: u8,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreSummary {
    pub fn incorrect_count(&self) -> usize {
        self.total - self.correct_count
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }

    pub fn is_correct(&self, question_id: usize) -> bool {
        self.outcomes
            .iter()
            .any(|outcome| outcome.question_id == question_id && outcome.is_correct)
    }
}

/// Checks one recorded answer against a question's key.
///
/// Single-answer keys need an exact id match. Multi-answer keys need the same
/// number of submitted ids, with every key id among them; order is ignored.
/// Missing answers and missing keys are never correct.
pub fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    let (Some(key), Some(answer)) = (&question.correct_answer, answer) else {
        return false;
    };

    match key {
        CorrectAnswer::Single(expected) => {
            matches!(answer, Answer::Single(given) if given == expected)
        }
        CorrectAnswer::Multiple(expected) => {
            let given = answer.ids();
            given.len() == expected.len() && expected.iter().all(|id| given.contains(id))
        }
    }
}

/// Scores every question against `answers`.
pub fn score(questions: &[Question], answers: &AnswerSet) -> Result<ScoreSummary, ScoreError> {
    if questions.is_empty() {
        return Err(ScoreError::NoQuestions);
    }

    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .map(|question| QuestionOutcome {
            question_id: question.id,
            is_correct: is_correct(question, answers.get(question.id)),
        })
        .collect();

    let correct_count = outcomes.iter().filter(|o| o.is_correct).count();
    let total = questions.len();
    let percentage = rounded_percentage(correct_count, total);

    tracing::info!(correct_count, total, percentage, "scored exam");
    Ok(ScoreSummary {
        correct_count,
        total,
        percentage,
        outcomes,
    })
}

/// `correct / total * 100`, rounded half up. `total` must be non-zero.
fn rounded_percentage(correct: usize, total: usize) -> u8 {
    let value = (correct * 200 + total) / (total * 2);
    value.min(100) as u8
}
