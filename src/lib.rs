//! # Mondai
//!
//! Turns authored math-problem text into display-ready paragraph markup.
//!
//! Problem texts mix Japanese prose, `$…$`/`$$…$$` math and hand-numbered
//! sub-questions such as `①`, `(1)` or `(ア)`. Formatting a text:
//!
//! 1. normalizes math delimiters to `\(…\)` and `\[…\]`,
//! 2. splits it into prose and math spans,
//! 3. opens a new `<p>` before every item marker in the prose,
//! 4. promotes top-level `\frac` to `\dfrac` in the math,
//! 5. wraps the result in paragraphs and drops empty ones.
//!
//! ## Example
//!
//! ```
//! use mondai::format_problem;
//!
//! let html = format_problem(Some("次の値を求めよ。①$\\frac{1}{2}$ ②$x$"));
//! assert_eq!(
//!     html,
//!     "<p>次の値を求めよ。</p><p>① \\(\\dfrac{1}{2}\\) </p><p>② \\(x\\)</p>"
//! );
//! ```

pub mod bank;
pub mod core;
pub mod utils;

pub use crate::core::{FormatOptions, ProblemFormatter};
pub use bank::{BankConfig, Book, BookFilter, ProblemBank, RandomQuery, ServedProblem};
pub use utils::{BankError, BankResult, FormatReport, FormatStats};

/// Normalize and format a problem text with default options.
///
/// Absent, empty and whitespace-only text yields `""`.
pub fn format_problem(text: Option<&str>) -> String {
    format_problem_with_options(text, &FormatOptions::default())
}

/// Normalize and format a problem text with custom options.
pub fn format_problem_with_options(text: Option<&str>, options: &FormatOptions) -> String {
    format_problem_with_report(text, options).content
}

/// Normalize and format a problem text, reporting what was changed.
pub fn format_problem_with_report(text: Option<&str>, options: &FormatOptions) -> FormatReport {
    ProblemFormatter::with_options(options.clone()).normalize_and_format(text)
}
