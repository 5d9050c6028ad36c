//! Problem records as stored in the bank documents.
//!
//! The documents are converted from spreadsheets, so any field may arrive as
//! an integer, a float, a string or not at all. `Cell` keeps whatever was
//! there and the accessors apply the lenient reading the server relies on.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Integral floats in this range convert to `i64` without saturating.
const I64_RANGE: Range<f64> = i64::MIN as f64..i64::MAX as f64;

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer reading: integers as-is, floats truncated, numeric strings
    /// parsed.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Value when the cell reads as a plain run of digits (`5`, `"05"`).
    pub fn as_digits(&self) -> Option<u64> {
        let shown = self.to_string();
        if !shown.is_empty() && shown.bytes().all(|b| b.is_ascii_digit()) {
            shown.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Cell {
    /// Integral floats print without a fractional part, so `3.0` from a
    /// spreadsheet export reads as problem `3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "{}", n),
            Cell::Float(x) if x.fract() == 0.0 && I64_RANGE.contains(x) => {
                write!(f, "{}", *x as i64)
            }
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Other(serde_json::Value::Null) => Ok(()),
            Cell::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One problem row
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProblemRecord {
    #[serde(default)]
    pub unit_name: Option<Cell>,
    #[serde(default)]
    pub difficulty: Option<Cell>,
    #[serde(default)]
    pub problem_number: Option<Cell>,
    #[serde(default)]
    pub problem_text: Option<Cell>,
    #[serde(default)]
    pub image_flag: Option<Cell>,
    #[serde(default)]
    pub image_number: Option<Cell>,
}

impl ProblemRecord {
    pub fn unit_name(&self) -> Option<&str> {
        self.unit_name.as_ref().and_then(Cell::as_text)
    }

    /// Raw problem text; `None` when absent or not a string.
    pub fn problem_text(&self) -> Option<&str> {
        self.problem_text.as_ref().and_then(Cell::as_text)
    }

    pub fn difficulty(&self) -> i64 {
        self.difficulty.as_ref().and_then(Cell::as_int).unwrap_or(0)
    }

    pub fn image_flag(&self) -> i64 {
        self.image_flag.as_ref().and_then(Cell::as_int).unwrap_or(0)
    }

    pub fn image_number(&self) -> Option<u64> {
        self.image_number.as_ref().and_then(Cell::as_digits)
    }

    /// Problem number as shown to users and compared in lookups.
    pub fn number_display(&self) -> String {
        self.problem_number
            .as_ref()
            .map(Cell::to_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ProblemRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn cells_accept_mixed_types() {
        let rec = record(json!({
            "unit_name": "数と式",
            "difficulty": "3",
            "problem_number": 12.0,
            "problem_text": "$x$を求めよ",
            "image_flag": 1,
            "image_number": "",
        }));
        assert_eq!(rec.unit_name(), Some("数と式"));
        assert_eq!(rec.difficulty(), 3);
        assert_eq!(rec.number_display(), "12");
        assert_eq!(rec.problem_text(), Some("$x$を求めよ"));
        assert_eq!(rec.image_flag(), 1);
        assert_eq!(rec.image_number(), None);
    }

    #[test]
    fn missing_fields_default() {
        let rec = record(json!({}));
        assert_eq!(rec.unit_name(), None);
        assert_eq!(rec.difficulty(), 0);
        assert_eq!(rec.image_flag(), 0);
        assert_eq!(rec.number_display(), "");
        assert_eq!(rec.problem_text(), None);
    }

    #[test]
    fn non_string_problem_text_is_absent() {
        let rec = record(json!({ "problem_text": 42 }));
        assert_eq!(rec.problem_text(), None);
        let rec = record(json!({ "problem_text": null }));
        assert_eq!(rec.problem_text(), None);
    }

    #[test]
    fn image_number_requires_digits() {
        assert_eq!(Cell::Int(7).as_digits(), Some(7));
        assert_eq!(Cell::Text("07".into()).as_digits(), Some(7));
        assert_eq!(Cell::Float(3.0).as_digits(), Some(3));
        assert_eq!(Cell::Int(-1).as_digits(), None);
        assert_eq!(Cell::Text("3a".into()).as_digits(), None);
        assert_eq!(Cell::Float(2.5).as_digits(), None);
    }

    #[test]
    fn unparsable_difficulty_reads_as_zero() {
        let rec = record(json!({ "difficulty": "hard" }));
        assert_eq!(rec.difficulty(), 0);
        let rec = record(json!({ "difficulty": 4.9 }));
        assert_eq!(rec.difficulty(), 4);
    }

    #[test]
    fn large_integral_floats_do_not_saturate() {
        assert_eq!(Cell::Float(-3.0).to_string(), "-3");
        assert_eq!(Cell::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(Cell::Float(-1e20).to_string(), "-100000000000000000000");
        assert_eq!(Cell::Float(f64::INFINITY).to_string(), "inf");
    }
}
