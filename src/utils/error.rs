//! Error handling for problem-bank operations
//!
//! The formatting pipeline itself never fails; every error here comes from
//! loading problem documents or from a selection that cannot be served.

use std::path::PathBuf;

use crate::bank::Book;

/// Problem-bank error type
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// A problem document could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A problem document is not a JSON array of problem records
    #[error("invalid problem document: {0}")]
    Json(#[from] serde_json::Error),
    /// Random selection needs at least one unit and one difficulty
    #[error("select at least one unit and one difficulty")]
    EmptySelection,
    /// No records are loaded for the requested book(s)
    #[error("no problem data loaded for {0}")]
    NoData(String),
    /// No record matches the selected units and difficulties
    #[error("no problem matches the selected units and difficulties")]
    NoMatch,
    /// A lookup argument was not supplied
    #[error("missing {0}")]
    MissingArgument(&'static str),
    /// No record has the requested unit and problem number
    #[error("problem not found: {unit} - {number}")]
    NotFound { unit: String, number: String },
}

/// Result type for problem-bank operations
pub type BankResult<T> = Result<T, BankError>;

// Convenience constructors
impl BankError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BankError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn no_data(book: Option<Book>) -> Self {
        match book {
            Some(book) => BankError::NoData(book.to_string()),
            None => BankError::NoData("any book".to_string()),
        }
    }

    pub fn not_found(unit: impl Into<String>, number: impl Into<String>) -> Self {
        BankError::NotFound {
            unit: unit.into(),
            number: number.into(),
        }
    }

    /// True for errors caused by the request rather than by the loaded data.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            BankError::EmptySelection | BankError::MissingArgument(_)
        )
    }
}
