//! Delimiter normalization
//!
//! Rewrites the mixed dollar/backslash math conventions found in authored
//! problem text into the canonical `\(…\)` and `\[…\]` pairs and repairs a few
//! recurring authoring artifacts. Nothing outside those rewrites is touched.

use lazy_static::lazy_static;
use regex::Regex;

pub const INLINE_OPEN: &str = r"\(";
pub const INLINE_CLOSE: &str = r"\)";
pub const DISPLAY_OPEN: &str = r"\[";
pub const DISPLAY_CLOSE: &str = r"\]";

const OPENERS: [&str; 2] = [INLINE_OPEN, DISPLAY_OPEN];
const CLOSERS: [&str; 2] = [INLINE_CLOSE, DISPLAY_CLOSE];

lazy_static! {
    static ref DISPLAY_DOLLARS: Regex = Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap();
    static ref INLINE_DOLLARS: Regex = Regex::new(r"\$([^$]*?)\$").unwrap();
    /// `\(f\)(1)\(` is `f(1)` split around its argument.
    static ref SPLIT_FUNCTION_ARG: Regex = Regex::new(r"f\\\)\s*\((\d+)\)\\\(").unwrap();
}

/// Normalize math delimiters and authoring artifacts in a problem text.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let text = DISPLAY_DOLLARS.replace_all(text, r"\[${1}\]");
    let text = INLINE_DOLLARS.replace_all(&text, r"\(${1}\)");
    let text = collapse_doubled_delimiters(text.into_owned());
    let text = space_after_commas(&text);
    let text = text
        .replace('＾', "^")
        .replace(r"\left\)", r"\left(")
        .replace(r"\right\(", r"\right)");
    let text = SPLIT_FUNCTION_ARG.replace_all(&text, "f(${1})");
    pad_delimiters(&text)
}

/// Collapse `\(\(` and `\)\)` until none remain.
///
/// A single `replace` can leave a residual pair (`\(\(\(` becomes `\(\(`), so
/// each rewrite runs to a fixed point.
fn collapse_doubled_delimiters(mut text: String) -> String {
    let doubled_open = INLINE_OPEN.repeat(2);
    while text.contains(&doubled_open) {
        text = text.replace(&doubled_open, INLINE_OPEN);
    }
    let doubled_close = INLINE_CLOSE.repeat(2);
    while text.contains(&doubled_close) {
        text = text.replace(&doubled_close, INLINE_CLOSE);
    }
    text
}

/// Map the ideographic comma to `,` and give every comma one trailing space.
fn space_after_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        let ch = if ch == '、' { ',' } else { ch };
        out.push(ch);
        if ch == ',' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            out.push(' ');
        }
    }
    out
}

/// Ensure one space before every opener and after every closer.
///
/// String edges count as whitespace, so no space is added at the very start
/// or end of the text.
fn pad_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some(open) = OPENERS.iter().find(|tok| rest.starts_with(**tok)) {
            if out.chars().next_back().is_some_and(|prev| !prev.is_whitespace()) {
                out.push(' ');
            }
            out.push_str(open);
            rest = &rest[open.len()..];
            continue;
        }
        if let Some(close) = CLOSERS.iter().find(|tok| rest.starts_with(**tok)) {
            out.push_str(close);
            rest = &rest[close.len()..];
            if rest.chars().next().is_some_and(|next| !next.is_whitespace()) {
                out.push(' ');
            }
            continue;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
