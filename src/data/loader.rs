use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::parser::{FormatError, parse_questions};
use crate::models::Question;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} is not a CSV file", .0.display())]
    NotCsv(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Reads and parses a question file. Only `.csv` paths are accepted.
pub fn load_questions_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    if !has_csv_extension(path) {
        return Err(LoadError::NotCsv(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_questions(&content)?;
    tracing::info!(
        path = %path.display(),
        count = questions.len(),
        "loaded questions"
    );
    Ok(questions)
}

fn has_csv_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".csv"))
}
