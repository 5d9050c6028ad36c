//! Display-style fraction promotion inside math spans
//!
//! Top-level `\frac` becomes `\dfrac` so a standalone fraction renders at full
//! size. Fractions nested in another group keep `\frac`: promoting those too
//! makes stacked fractions overflow the line.

use super::normalize::{DISPLAY_CLOSE, DISPLAY_OPEN, INLINE_CLOSE, INLINE_OPEN};

pub const FRAC: &str = r"\frac";
pub const DFRAC: &str = r"\dfrac";

/// Recognized delimiter pairs, longest legacy form first.
const DELIMITERS: [(&str, &str); 4] = [
    (DISPLAY_OPEN, DISPLAY_CLOSE),
    (INLINE_OPEN, INLINE_CLOSE),
    ("$$", "$$"),
    ("$", "$"),
];

/// Brace nesting depth; never goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceDepth(usize);

impl BraceDepth {
    pub fn open(&mut self) {
        self.0 += 1;
    }

    /// A stray `}` leaves the depth at zero.
    pub fn close(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_top_level(&self) -> bool {
        self.0 == 0
    }
}

/// Counts of `\frac` rewrites in one math span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FractionCounts {
    pub promoted: usize,
    pub compact: usize,
}

/// Promote top-level fractions of a delimited math span.
///
/// Spans without a recognized delimiter pair are returned unchanged.
pub fn promote(math: &str) -> String {
    promote_counted(math).0
}

/// Like [`promote`], also reporting how many fractions were promoted.
pub fn promote_counted(math: &str) -> (String, FractionCounts) {
    let Some((open, inner, close)) = strip_delimiters(math) else {
        return (math.to_string(), FractionCounts::default());
    };

    let mut out = String::with_capacity(math.len() + 8);
    let mut counts = FractionCounts::default();
    let mut depth = BraceDepth::default();
    let mut prev: Option<char> = None;
    let mut rest = inner;

    out.push_str(open);
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(FRAC) {
            if depth.is_top_level() {
                out.push_str(DFRAC);
                counts.promoted += 1;
            } else {
                out.push_str(FRAC);
                counts.compact += 1;
            }
            rest = &rest[FRAC.len()..];
            prev = Some('c');
            continue;
        }
        let escaped = prev == Some('\\');
        match ch {
            '{' if !escaped => depth.open(),
            '}' if !escaped => depth.close(),
            _ => {}
        }
        out.push(ch);
        prev = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out.push_str(close);

    (out, counts)
}

fn strip_delimiters(math: &str) -> Option<(&'static str, &str, &'static str)> {
    DELIMITERS.iter().find_map(|&(open, close)| {
        math.strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
            .map(|inner| (open, inner, close))
    })
}
