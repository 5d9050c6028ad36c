//! Immutable problem-bank snapshot
//!
//! The bank is loaded once at start-up and then only read, so it can be shared
//! by reference between any number of request handlers.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::ProblemFormatter;
use crate::utils::error::{BankError, BankResult};

use super::record::ProblemRecord;
use super::Book;

pub const DEFAULT_CHART_PATH: &str = "aochart.json";
pub const DEFAULT_EX_PATH: &str = "aochart_ex.json";

/// Locations of the bank documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub chart_path: PathBuf,
    pub ex_path: PathBuf,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
            ex_path: PathBuf::from(DEFAULT_EX_PATH),
        }
    }
}

impl BankConfig {
    /// Defaults, overridden by `MONDAI_CHART_PATH` and `MONDAI_EX_PATH`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chart_path: std::env::var_os("MONDAI_CHART_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_path),
            ex_path: std::env::var_os("MONDAI_EX_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.ex_path),
        }
    }

    pub fn path(&self, book: Book) -> &Path {
        match book {
            Book::Chart => &self.chart_path,
            Book::Ex => &self.ex_path,
        }
    }
}

/// Problem records of both books plus the formatter used to serve them.
#[derive(Debug, Clone, Default)]
pub struct ProblemBank {
    chart: Vec<ProblemRecord>,
    ex: Vec<ProblemRecord>,
    formatter: ProblemFormatter,
}

impl ProblemBank {
    pub fn new(chart: Vec<ProblemRecord>, ex: Vec<ProblemRecord>) -> Self {
        Self {
            chart,
            ex,
            formatter: ProblemFormatter::new(),
        }
    }

    pub fn with_formatter(mut self, formatter: ProblemFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Build a bank from the JSON text of both documents.
    pub fn from_json_str(chart: &str, ex: &str) -> BankResult<Self> {
        Ok(Self::new(parse_records(chart)?, parse_records(ex)?))
    }

    /// Load both documents, failing on the first one that cannot be read.
    pub fn try_load(config: &BankConfig) -> BankResult<Self> {
        Ok(Self::new(
            read_records(config.path(Book::Chart))?,
            read_records(config.path(Book::Ex))?,
        ))
    }

    /// Load both documents; a document that fails to load leaves its book
    /// empty and is reported at `warn` level.
    pub fn load(config: &BankConfig) -> Self {
        Self::new(
            load_book(config, Book::Chart),
            load_book(config, Book::Ex),
        )
    }

    pub fn records(&self, book: Book) -> &[ProblemRecord] {
        match book {
            Book::Chart => &self.chart,
            Book::Ex => &self.ex,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chart.is_empty() && self.ex.is_empty()
    }

    pub fn formatter(&self) -> &ProblemFormatter {
        &self.formatter
    }
}

/// Bare non-finite tokens written by spreadsheet exports for empty cells.
const NON_FINITE: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

fn parse_records(json: &str) -> BankResult<Vec<ProblemRecord>> {
    Ok(serde_json::from_str(&null_non_finite(json))?)
}

/// Replace `NaN`/`Infinity` tokens outside string literals with `null`.
fn null_non_finite(json: &str) -> Cow<'_, str> {
    if !NON_FINITE.iter().any(|t| json.contains(t)) {
        return Cow::Borrowed(json);
    }

    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut rest = json;

    while let Some(ch) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if !prev.is_some_and(is_word_char) {
            if let Some(token) = NON_FINITE.iter().find(|t| is_token_at(rest, t)) {
                out.push_str("null");
                prev = Some('l');
                rest = &rest[token.len()..];
                continue;
            }
        }
        out.push(ch);
        prev = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }

    Cow::Owned(out)
}

fn is_token_at(rest: &str, token: &str) -> bool {
    rest.strip_prefix(token)
        .is_some_and(|after| !after.chars().next().is_some_and(is_word_char))
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn read_records(path: &Path) -> BankResult<Vec<ProblemRecord>> {
    let json = fs::read_to_string(path).map_err(|e| BankError::io(path, e))?;
    parse_records(&json)
}

fn load_book(config: &BankConfig, book: Book) -> Vec<ProblemRecord> {
    let path = config.path(book);
    match read_records(path) {
        Ok(records) => {
            log::info!(
                "loaded {} {} problems from {}",
                records.len(),
                book,
                path.display()
            );
            records
        }
        Err(e) => {
            log::warn!("failed to load {} problems: {}", book, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_str_reads_both_books() {
        let bank = ProblemBank::from_json_str(
            r#"[{"unit_name": "数と式", "problem_number": 1}]"#,
            r#"[]"#,
        )
        .unwrap();
        assert_eq!(bank.records(Book::Chart).len(), 1);
        assert!(bank.records(Book::Ex).is_empty());
        assert!(!bank.is_empty());
    }

    #[test]
    fn from_json_str_rejects_non_arrays() {
        let err = ProblemBank::from_json_str(r#"{"a": 1}"#, "[]").unwrap_err();
        assert!(matches!(err, BankError::Json(_)));
    }

    #[test]
    fn config_paths_by_book() {
        let config = BankConfig::default();
        assert_eq!(config.path(Book::Chart), Path::new(DEFAULT_CHART_PATH));
        assert_eq!(config.path(Book::Ex), Path::new(DEFAULT_EX_PATH));
    }

    #[test]
    fn lenient_load_of_missing_files_is_empty() {
        let config = BankConfig {
            chart_path: PathBuf::from("/nonexistent/chart.json"),
            ex_path: PathBuf::from("/nonexistent/ex.json"),
        };
        assert!(ProblemBank::load(&config).is_empty());
        assert!(matches!(
            ProblemBank::try_load(&config),
            Err(BankError::Io { .. })
        ));
    }

    #[test]
    fn non_finite_tokens_read_as_null() {
        let json = r#"[{"a": NaN, "b": -Infinity, "c": [Infinity], "d": "NaN \" NaN"}]"#;
        assert_eq!(
            null_non_finite(json),
            r#"[{"a": null, "b": null, "c": [null], "d": "NaN \" NaN"}]"#
        );
        assert!(matches!(null_non_finite(r#"[{"a": 1}]"#), Cow::Borrowed(_)));
    }

    #[test]
    fn nan_cells_load_as_absent() {
        let bank = ProblemBank::from_json_str(
            r#"[{"unit_name": "数と式", "difficulty": NaN, "image_number": NaN}]"#,
            "[]",
        )
        .unwrap();
        let record = &bank.records(Book::Chart)[0];
        assert_eq!(record.image_number, None);
        assert_eq!(record.difficulty(), 0);
    }
}
