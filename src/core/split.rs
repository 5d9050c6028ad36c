//! Prose/math span splitting

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any canonical or legacy math span, shortest match, across newlines.
    static ref MATH_SPAN: Regex =
        Regex::new(r"(?s)\$\$.*?\$\$|\$.*?\$|\\\(.*?\\\)|\\\[.*?\\\]").unwrap();
}

/// Classification of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Prose,
    Math,
}

/// A slice of the normalized text, in original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub content: &'a str,
}

impl<'a> Span<'a> {
    pub fn prose(content: &'a str) -> Self {
        Self {
            kind: SpanKind::Prose,
            content,
        }
    }

    pub fn math(content: &'a str) -> Self {
        Self {
            kind: SpanKind::Math,
            content,
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind == SpanKind::Math
    }
}

/// Split text into alternating prose and math spans.
///
/// The sequence always starts and ends with a prose span (possibly empty) and
/// alternates strictly, so the concatenation of every `content` is `text`.
pub fn split(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for m in MATH_SPAN.find_iter(text) {
        spans.push(Span::prose(&text[last..m.start()]));
        spans.push(Span::math(m.as_str()));
        last = m.end();
    }
    spans.push(Span::prose(&text[last..]));
    spans
}
