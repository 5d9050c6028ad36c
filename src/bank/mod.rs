//! Problem bank
//!
//! Loads the two problem books (the main chart and its exercises), selects
//! problems from them and serves each one with its text run through the
//! formatting pipeline.

pub mod record;
pub mod select;
pub mod store;

use std::fmt;
use std::str::FromStr;

pub use record::{Cell, ProblemRecord};
pub use select::{RandomQuery, ServedProblem};
pub use store::{BankConfig, ProblemBank};

/// Problem book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Book {
    Chart,
    Ex,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Book::Chart => write!(f, "chart"),
            Book::Ex => write!(f, "ex"),
        }
    }
}

impl FromStr for Book {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chart" => Ok(Book::Chart),
            "ex" => Ok(Book::Ex),
            other => Err(format!("unknown book '{}'", other)),
        }
    }
}

/// Which books a random selection draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookFilter {
    #[default]
    All,
    Chart,
    Ex,
}

impl BookFilter {
    /// Books in draw order: chart records come before exercise records.
    pub fn books(&self) -> &'static [Book] {
        match self {
            BookFilter::All => &[Book::Chart, Book::Ex],
            BookFilter::Chart => &[Book::Chart],
            BookFilter::Ex => &[Book::Ex],
        }
    }

    pub fn single(&self) -> Option<Book> {
        match self {
            BookFilter::All => None,
            BookFilter::Chart => Some(Book::Chart),
            BookFilter::Ex => Some(Book::Ex),
        }
    }
}

impl FromStr for BookFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(BookFilter::All),
            other => other.parse::<Book>().map(BookFilter::from),
        }
    }
}

impl From<Book> for BookFilter {
    fn from(book: Book) -> Self {
        match book {
            Book::Chart => BookFilter::Chart,
            Book::Ex => BookFilter::Ex,
        }
    }
}
