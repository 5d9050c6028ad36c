//! Problem selection: random pick by unit/difficulty and direct lookup.

use serde::Serialize;

use crate::utils::error::{BankError, BankResult};

use super::record::{Cell, ProblemRecord};
use super::store::ProblemBank;
use super::{Book, BookFilter};

/// A random-selection request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomQuery {
    pub book: BookFilter,
    pub units: Vec<String>,
    pub difficulties: Vec<i64>,
}

impl RandomQuery {
    /// Difficulties that are neither non-negative integers nor digit strings
    /// are dropped.
    pub fn new<I>(book: BookFilter, units: Vec<String>, difficulties: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        Self {
            book,
            units,
            difficulties: difficulties
                .into_iter()
                .filter_map(|d| parse_difficulty(&d))
                .collect(),
        }
    }

    fn matches(&self, record: &ProblemRecord) -> bool {
        record
            .unit_name()
            .is_some_and(|unit| self.units.iter().any(|u| u == unit))
            && self.difficulties.contains(&record.difficulty())
    }
}

fn parse_difficulty(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Int(n) if *n >= 0 => Some(*n),
        Cell::Text(_) => cell.as_digits().and_then(|n| i64::try_from(n).ok()),
        _ => None,
    }
}

/// A formatted problem, ready to embed in a response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServedProblem {
    pub unit_name: Option<String>,
    pub problem_number: String,
    /// Paragraph markup of the problem text
    pub equation: String,
    pub image_flag: i64,
    pub image_number: Option<u64>,
    pub difficulty: i64,
}

impl ProblemBank {
    /// Pick one record matching `query`.
    ///
    /// `choose` receives the number of candidates and returns an index; values
    /// past the end select the last candidate.
    pub fn pick_random<F>(&self, query: &RandomQuery, choose: F) -> BankResult<ServedProblem>
    where
        F: FnOnce(usize) -> usize,
    {
        if query.units.is_empty() || query.difficulties.is_empty() {
            return Err(BankError::EmptySelection);
        }

        let books = query.book.books();
        if books.iter().all(|b| self.records(*b).is_empty()) {
            return Err(BankError::no_data(query.book.single()));
        }

        let candidates: Vec<(Book, &ProblemRecord)> = books
            .iter()
            .flat_map(|b| self.records(*b).iter().map(move |r| (*b, r)))
            .filter(|(_, r)| query.matches(r))
            .collect();
        if candidates.is_empty() {
            return Err(BankError::NoMatch);
        }

        let index = choose(candidates.len()).min(candidates.len() - 1);
        let (book, record) = candidates[index];
        log::debug!(
            "picked {} problem {} ({} of {} candidates)",
            book,
            record.number_display(),
            index + 1,
            candidates.len()
        );

        let number = record.number_display();
        let display = match book {
            Book::Ex => format!("EXERCISE {}", number),
            Book::Chart => number,
        };
        Ok(self.serve(record, display))
    }

    /// Find the first record of `book` with the given unit and number.
    pub fn lookup(
        &self,
        book: Book,
        unit: Option<&str>,
        number: Option<&str>,
    ) -> BankResult<ServedProblem> {
        let records = self.records(book);
        if records.is_empty() {
            return Err(BankError::no_data(Some(book)));
        }
        let unit = unit
            .filter(|u| !u.is_empty())
            .ok_or(BankError::MissingArgument("unit"))?;
        let number = number
            .filter(|n| !n.is_empty())
            .ok_or(BankError::MissingArgument("problem number"))?;

        let record = records
            .iter()
            .find(|r| r.unit_name() == Some(unit) && r.number_display() == number)
            .ok_or_else(|| BankError::not_found(unit, number))?;
        Ok(self.serve(record, number.to_string()))
    }

    fn serve(&self, record: &ProblemRecord, problem_number: String) -> ServedProblem {
        let equation = self
            .formatter()
            .normalize_and_format(record.problem_text())
            .content;
        ServedProblem {
            unit_name: record.unit_name().map(str::to_string),
            problem_number,
            equation,
            image_flag: record.image_flag(),
            image_number: record.image_number(),
            difficulty: record.difficulty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn difficulties_accept_ints_and_digit_strings() {
        let query = RandomQuery::new(
            BookFilter::All,
            vec!["u".into()],
            vec![
                Cell::Int(1),
                Cell::Text("2".into()),
                Cell::Text("x".into()),
                Cell::Int(-3),
                Cell::Float(4.0),
            ],
        );
        assert_eq!(query.difficulties, vec![1, 2]);
    }

    #[test]
    fn empty_units_or_difficulties_is_request_error() {
        let bank = ProblemBank::default();
        let query = RandomQuery::new(BookFilter::All, vec![], vec![Cell::Int(1)]);
        let err = bank.pick_random(&query, |_| 0).unwrap_err();
        assert!(matches!(err, BankError::EmptySelection));
    }

    #[test]
    fn empty_bank_has_no_data() {
        let bank = ProblemBank::default();
        let query = RandomQuery::new(BookFilter::Ex, vec!["u".into()], vec![Cell::Int(1)]);
        let err = bank.pick_random(&query, |_| 0).unwrap_err();
        assert_eq!(err.to_string(), "no problem data loaded for ex");
    }

    #[test]
    fn lookup_requires_unit_and_number() {
        let bank = ProblemBank::from_json_str(r#"[{"unit_name": "u"}]"#, "[]").unwrap();
        assert!(matches!(
            bank.lookup(Book::Chart, None, Some("1")),
            Err(BankError::MissingArgument("unit"))
        ));
        assert!(matches!(
            bank.lookup(Book::Chart, Some("u"), Some("")),
            Err(BankError::MissingArgument("problem number"))
        ));
    }
}
