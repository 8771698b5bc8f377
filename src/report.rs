//! Downloadable result artifact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::models::{Answer, AnswerSet, CorrectAnswer, Question, QuestionKind};
use crate::scoring::{ScoreSummary, is_correct};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One question in the report.
///
/// Multi-answer entries serialize their answers as `yourAnswers` and
/// `correctAnswers` arrays (empty when unanswered); single-answer entries use
/// `yourAnswer` and `correctAnswer`, with `null` for a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub question: String,
    pub kind: QuestionKind,
    pub your_answer: Option<Answer>,
    pub correct_answer: Option<CorrectAnswer>,
    pub is_correct: bool,
}

impl Serialize for ReportEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entry = serializer.serialize_struct("ReportEntry", 5)?;
        entry.serialize_field("question", &self.question)?;
        entry.serialize_field("type", &self.kind)?;
        match self.kind {
            QuestionKind::SingleAnswer => {
                entry.serialize_field("yourAnswer", &self.your_answer)?;
                entry.serialize_field("correctAnswer", &self.correct_answer)?;
            }
            QuestionKind::MultiAnswer => {
                let yours = self.your_answer.as_ref().map_or(&[][..], Answer::ids);
                let correct = self.correct_answer.as_ref().map_or(&[][..], CorrectAnswer::ids);
                entry.serialize_field("yourAnswers", yours)?;
                entry.serialize_field("correctAnswers", correct)?;
            }
        }
        entry.serialize_field("isCorrect", &self.is_correct)?;
        entry.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub score: usize,
    pub total: usize,
    pub percentage: u8,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
    pub questions: Vec<ReportEntry>,
}

impl ResultReport {
    pub fn new(
        questions: &[Question],
        answers: &AnswerSet,
        summary: &ScoreSummary,
        date: DateTime<Utc>,
    ) -> Self {
        let entries = questions
            .iter()
            .map(|question| {
                let your_answer = answers.get(question.id).cloned();
                ReportEntry {
                    question: question.text.clone(),
                    kind: question.kind(),
                    is_correct: is_correct(question, your_answer.as_ref()),
                    your_answer,
                    correct_answer: question.correct_answer.clone(),
                }
            })
            .collect();

        Self {
            score: summary.correct_count,
            total: summary.total,
            percentage: summary.percentage,
            date,
            questions: entries,
        }
    }

    /// `exam-results-<unix millis>.json`
    pub fn default_file_name(&self) -> String {
        format!("exam-results-{}.json", self.date.timestamp_millis())
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as pretty JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "exported results");
        Ok(())
    }

    /// Writes the report under `dir` with the default file name.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(self.default_file_name());
        self.write_to(&path)?;
        Ok(path)
    }
}

fn serialize_date<S: serde::Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use chrono::TimeZone;

    fn fixture() -> (Vec<Question>, AnswerSet) {
        let questions = vec![
            Question::new(1, "Pick B".into(), ["1".into(), "2".into(), "3".into(), "4".into()])
                .with_correct_answer(Some(CorrectAnswer::Single("B".into()))),
            Question::new(2, "Pick B and C".into(), ["1".into(), "2".into(), "3".into(), "4".into()])
                .with_correct_answer(Some(CorrectAnswer::Multiple(vec!["B".into(), "C".into()]))),
            Question::new(3, "Skipped".into(), ["1".into(), "2".into(), "3".into(), "4".into()])
                .with_correct_answer(Some(CorrectAnswer::Single("A".into()))),
        ];
        let mut answers = AnswerSet::new();
        answers.select(1, "B");
        answers.toggle(2, "C");
        answers.toggle(2, "B");
        (questions, answers)
    }

    #[test]
    fn test_entries_match_summary() {
        let (questions, answers) = fixture();
        let summary = score(&questions, &answers).unwrap();
        let date = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        let report = ResultReport::new(&questions, &answers, &summary, date);

        assert_eq!(report.questions.len(), questions.len());
        for (entry, outcome) in report.questions.iter().zip(&summary.outcomes) {
            assert_eq!(entry.is_correct, outcome.is_correct);
        }
        assert_eq!(report.score, 2);
        assert_eq!(report.percentage, 67);
        assert_eq!(report.questions[2].your_answer, None);
    }

    #[test]
    fn test_json_layout() {
        let (questions, answers) = fixture();
        let summary = score(&questions, &answers).unwrap();
        let date = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        let report = ResultReport::new(&questions, &answers, &summary, date);

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["score"], 2);
        assert_eq!(value["total"], 3);
        assert_eq!(value["date"], "2026-10-15T12:00:00.000Z");
        assert_eq!(value["questions"][0]["type"], "MCQ");
        assert_eq!(value["questions"][1]["type"], "MSQ");
        assert_eq!(value["questions"][0]["yourAnswer"], "B");
        assert_eq!(value["questions"][0]["correctAnswer"], "B");
        assert_eq!(value["questions"][1]["yourAnswers"], serde_json::json!(["C", "B"]));
        assert_eq!(value["questions"][1]["correctAnswers"], serde_json::json!(["B", "C"]));
        assert!(value["questions"][1].get("yourAnswer").is_none());
        assert_eq!(value["questions"][1]["isCorrect"], true);
        assert_eq!(value["questions"][2]["yourAnswer"], serde_json::Value::Null);
    }

    #[test]
    fn test_unanswered_multi_answer_exports_empty_list() {
        let questions = vec![
            Question::new(1, "Pick A and D".into(), ["1".into(), "2".into(), "3".into(), "4".into()])
                .with_correct_answer(Some(CorrectAnswer::Multiple(vec!["A".into(), "D".into()]))),
        ];
        let answers = AnswerSet::new();
        let summary = score(&questions, &answers).unwrap();
        let report = ResultReport::new(&questions, &answers, &summary, Utc::now());

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let entry = &value["questions"][0];
        assert_eq!(entry["type"], "MSQ");
        assert_eq!(entry["yourAnswers"], serde_json::json!([]));
        assert_eq!(entry["correctAnswers"], serde_json::json!(["A", "D"]));
        assert_eq!(entry["isCorrect"], false);
    }

    #[test]
    fn test_write_into_uses_default_name() {
        let (questions, answers) = fixture();
        let summary = score(&questions, &answers).unwrap();
        let date = Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap();
        let report = ResultReport::new(&questions, &answers, &summary, date);

        let dir = tempfile::tempdir().unwrap();
        let path = report.write_into(dir.path()).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(format!("exam-results-{}.json", date.timestamp_millis()).as_str())
        );
        assert!(fs::read_to_string(path).unwrap().contains("\"percentage\": 67"));
    }
}
