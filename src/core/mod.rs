//! Problem-text formatting pipeline
//!
//! This module contains the five stages a problem text goes through:
//! - `normalize`: canonical `\(…\)` / `\[…\]` delimiters and artifact repair
//! - `split`: alternating prose and math spans
//! - `itemize`: paragraph breaks before enumerated-item markers
//! - `promote`: `\dfrac` for top-level fractions
//! - `assemble`: paragraph wrapping and empty-paragraph cleanup

pub mod assemble;
pub mod formatter;
pub mod itemize;
pub mod normalize;
pub mod options;
pub mod promote;
pub mod split;

pub use assemble::assemble;
pub use formatter::ProblemFormatter;
pub use itemize::{itemize, MarkerFamily, SeriesState};
pub use normalize::normalize;
pub use options::FormatOptions;
pub use promote::{promote, promote_counted, BraceDepth, FractionCounts};
pub use split::{split, Span, SpanKind};
