mod loader;
mod parser;

pub use loader::{LoadError, load_questions_from_csv};
pub use parser::{FormatError, MIN_COLUMNS, parse_questions};
