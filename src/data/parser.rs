//! CSV question parsing.
//!
//! The format is deliberately naive: lines are split on `,` with no quoting
//! support, so a comma inside question or option text shifts the columns.

use thiserror::Error;

use crate::models::{CorrectAnswer, Question};

/// Column layout: question, option_a..option_d, correct_answer.
pub const MIN_COLUMNS: usize = 6;

const ANSWER_COLUMN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("CSV file must contain at least a header and one question")]
    TooFewLines,

    #[error(
        "line {line}: expected 6 columns (question, option_a, option_b, option_c, option_d, correct_answer)"
    )]
    TooFewColumns { line: usize },

    #[error("no valid questions found in the CSV file")]
    NoQuestions,
}

/// Parses raw CSV text into questions, in row order.
///
/// The first non-blank line is a header and is ignored. Question ids are the
/// 1-based index of each data row.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, FormatError> {
    let lines: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(FormatError::TooFewLines);
    }

    let mut questions = Vec::with_capacity(lines.len() - 1);
    for (index, line) in lines.iter().enumerate().skip(1) {
        questions.push(parse_row(index, line)?);
    }

    if questions.is_empty() {
        return Err(FormatError::NoQuestions);
    }

    tracing::debug!(count = questions.len(), "parsed questions");
    Ok(questions)
}

fn parse_row(index: usize, line: &str) -> Result<Question, FormatError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < MIN_COLUMNS {
        return Err(FormatError::TooFewColumns { line: index + 1 });
    }

    let option_texts = [
        fields[1].to_string(),
        fields[2].to_string(),
        fields[3].to_string(),
        fields[4].to_string(),
    ];

    let answer_field = answer_field(&fields[ANSWER_COLUMN..]);
    let tokens = correct_tokens(&answer_field);
    if tokens.is_empty() {
        tracing::debug!(line = index + 1, "row has no correct answer");
    }

    Ok(Question::new(index, fields[0].to_string(), option_texts)
        .with_correct_answer(CorrectAnswer::from_tokens(tokens)))
}

/// The answer key is field 5 alone, unless it opens a quote: a quoted key
/// like `"B,C"` was cut by the naive split and is rejoined up to the field
/// that closes the quote (or the end of the row).
fn answer_field(fields: &[&str]) -> String {
    let first = fields[0];
    if !first.starts_with('"') || (first.len() > 1 && first.ends_with('"')) {
        return first.to_string();
    }

    let closing = fields[1..]
        .iter()
        .position(|field| field.ends_with('"'))
        .map_or(fields.len(), |pos| pos + 2);
    fields[..closing].join(",")
}

/// Upper-cases the field, drops quote characters and splits it into ids.
/// Empty tokens are discarded; duplicates are kept.
fn correct_tokens(field: &str) -> Vec<String> {
    field
        .to_uppercase()
        .replace('"', "")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;

    const HEADER: &str = "question,option_a,option_b,option_c,option_d,correct_answer";

    fn csv(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parses_rows_in_order_with_sequential_ids() {
        let text = csv(&[
            "What is 2+2?,3,4,5,6,B",
            "Capital of France?,London,Berlin,Paris,Madrid,C",
            "Largest planet?,Mars,Jupiter,Venus,Earth,b",
        ]);

        let questions = parse_questions(&text).unwrap();
        assert_eq!(questions.len(), 3);
        let ids: Vec<usize> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(questions[1].text, "Capital of France?");
        assert_eq!(questions[1].options[2].text, "Paris");
        assert_eq!(
            questions[2].correct_answer,
            Some(CorrectAnswer::Single("B".to_string()))
        );
    }

    #[test]
    fn test_single_and_multi_answer_kinds() {
        let text = csv(&["Pick one,1,2,3,4,B", "Select primes,1,2,3,4,\"B,C\""]);
        let questions = parse_questions(&text).unwrap();

        assert_eq!(questions[0].kind(), QuestionKind::SingleAnswer);
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Single("B".to_string()))
        );

        assert_eq!(questions[1].kind(), QuestionKind::MultiAnswer);
        assert_eq!(
            questions[1].correct_answer,
            Some(CorrectAnswer::Multiple(vec!["B".to_string(), "C".to_string()]))
        );
    }

    #[test]
    fn test_quoted_multi_answer_keeps_duplicates() {
        let text = csv(&["Select,1,2,3,4,\"a, c ,a\""]);
        let questions = parse_questions(&text).unwrap();
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Multiple(vec![
                "A".to_string(),
                "C".to_string(),
                "A".to_string()
            ]))
        );
    }

    #[test]
    fn test_too_few_columns_names_the_line() {
        let text = csv(&["Fine,1,2,3,4,A", "Broken,1,2,3"]);
        let err = parse_questions(&text).unwrap_err();
        assert_eq!(err, FormatError::TooFewColumns { line: 3 });
        assert!(err.to_string().starts_with("line 3: expected 6 columns"));
    }

    #[test]
    fn test_header_only_is_rejected() {
        assert_eq!(parse_questions(HEADER), Err(FormatError::TooFewLines));
        assert_eq!(parse_questions(""), Err(FormatError::TooFewLines));
        assert_eq!(
            parse_questions(&format!("{HEADER}\n   \n\n")),
            Err(FormatError::TooFewLines)
        );
    }

    #[test]
    fn test_blank_lines_are_skipped_and_do_not_count() {
        let text = format!("\n{HEADER}\r\n\r\nQ1,a,b,c,d,A\r\n   \nQ2,a,b,c,d,D\n");
        let questions = parse_questions(&text).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, 2);
        assert_eq!(questions[1].text, "Q2");
    }

    #[test]
    fn test_empty_answer_field_is_accepted() {
        let text = csv(&["No key,1,2,3,4,", "Only commas,1,2,3,4, , ,"]);
        let questions = parse_questions(&text).unwrap();
        assert!(questions.iter().all(|q| q.correct_answer.is_none()));
        assert!(questions.iter().all(|q| q.kind() == QuestionKind::SingleAnswer));
    }

    #[test]
    fn test_comma_in_text_shifts_columns() {
        let text = csv(&["Hello, world,1,2,3,4,A"]);
        let questions = parse_questions(&text).unwrap();
        assert_eq!(questions[0].text, "Hello");
        assert_eq!(questions[0].options[0].text, "world");
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Single("4".to_string()))
        );
    }

    #[test]
    fn test_extra_columns_after_unquoted_key_are_ignored() {
        let text = csv(&["Q,1,2,3,4,B,see notes", "R,1,2,3,4,C,D"]);
        let questions = parse_questions(&text).unwrap();
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Single("B".to_string()))
        );
        assert_eq!(
            questions[1].correct_answer,
            Some(CorrectAnswer::Single("C".to_string()))
        );
    }

    #[test]
    fn test_quoted_key_stops_at_closing_quote() {
        let text = csv(&["Q,1,2,3,4,\"B,C\",see notes", "R,1,2,3,4,\"D\",x", "S,1,2,3,4,\"A,B"]);
        let questions = parse_questions(&text).unwrap();
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Multiple(vec!["B".to_string(), "C".to_string()]))
        );
        assert_eq!(
            questions[1].correct_answer,
            Some(CorrectAnswer::Single("D".to_string()))
        );
        assert_eq!(
            questions[2].correct_answer,
            Some(CorrectAnswer::Multiple(vec!["A".to_string(), "B".to_string()]))
        );
    }

    #[test]
    fn test_unknown_answer_ids_are_not_validated() {
        let text = csv(&["Q,1,2,3,4,E"]);
        let questions = parse_questions(&text).unwrap();
        assert_eq!(
            questions[0].correct_answer,
            Some(CorrectAnswer::Single("E".to_string()))
        );
    }
}
