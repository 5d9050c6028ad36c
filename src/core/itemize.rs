//! Enumerated-item detection in prose spans
//!
//! Problem texts number their sub-questions with three marker styles, often
//! mixed in one text: `①②③`, `(1)(2)(3)` and `(ア)(イ)(ウ)`. Each marker opens a
//! new paragraph. The family seen first in a text is the top level and gets no
//! indent; every other family is treated as nested and gets the indent token.

use serde::Serialize;

use super::options::FormatOptions;

/// Closes the running paragraph and opens the next one.
pub const PARAGRAPH_BREAK: &str = "</p><p>";

const CIRCLED_FIRST: char = '\u{2460}'; // ①
const CIRCLED_LAST: char = '\u{2473}'; // ⑳
const KANA_FIRST: char = 'ア';
const KANA_LAST: char = 'コ';

/// Enumerated-list marker style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerFamily {
    /// Circled numeral like ①, ②, ③
    CircledNumeral,
    /// Parenthesized numeral like (1), (2), (3)
    ParenNumeral,
    /// Parenthesized katakana like (ア), (イ), (ウ)
    ParenKana,
}

/// Marker families seen so far in one text, in first-seen order.
///
/// One state is threaded through every prose span of a single text and then
/// dropped; it is never shared between texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesState {
    families: Vec<MarkerFamily>,
    items: usize,
}

impl SeriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an item of `family`, returning its first-seen rank.
    pub fn observe(&mut self, family: MarkerFamily) -> usize {
        self.items += 1;
        match self.families.iter().position(|f| *f == family) {
            Some(rank) => rank,
            None => {
                self.families.push(family);
                self.families.len() - 1
            }
        }
    }

    /// True for the first family seen in the text.
    pub fn is_primary(&self, family: MarkerFamily) -> bool {
        self.families.first() == Some(&family)
    }

    pub fn families(&self) -> &[MarkerFamily] {
        &self.families
    }

    /// Number of markers turned into paragraphs so far.
    pub fn items(&self) -> usize {
        self.items
    }
}

/// Insert a paragraph break before every item marker in `prose`.
///
/// Markers are kept verbatim; items of a non-primary family are prefixed with
/// `options.indent`. All other text passes through unchanged.
pub fn itemize(prose: &str, series: &mut SeriesState, options: &FormatOptions) -> String {
    let mut out = String::with_capacity(prose.len() + 16);
    let mut prev: Option<char> = None;
    let mut rest = prose;

    while let Some(ch) = rest.chars().next() {
        if !prev.is_some_and(blocks_marker) {
            if let Some((family, len)) = match_marker(rest, options) {
                let marker = &rest[..len];
                series.observe(family);
                out.push_str(PARAGRAPH_BREAK);
                if !series.is_primary(family) {
                    out.push_str(&options.indent);
                }
                out.push_str(marker);
                prev = marker.chars().next_back();
                rest = &rest[len..];
                continue;
            }
        }
        out.push(ch);
        prev = Some(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// A marker glued to an identifier or an open paren is not an item: `f(1)`,
/// `x_(2)`, `((1))`.
fn blocks_marker(prev: char) -> bool {
    prev.is_ascii_alphanumeric() || matches!(prev, '_' | '(' | '（')
}

fn closing_paren(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '（' => Some('）'),
        _ => None,
    }
}

/// Match a marker at the start of `rest`, returning its family and byte length.
fn match_marker(rest: &str, options: &FormatOptions) -> Option<(MarkerFamily, usize)> {
    let open = rest.chars().next()?;
    if (CIRCLED_FIRST..=CIRCLED_LAST).contains(&open) {
        return Some((MarkerFamily::CircledNumeral, open.len_utf8()));
    }

    let close = closing_paren(open)?;
    let inner = &rest[open.len_utf8()..];

    let label = inner.chars().next()?;
    if (KANA_FIRST..=KANA_LAST).contains(&label) {
        let after = &inner[label.len_utf8()..];
        return after.starts_with(close).then(|| {
            (
                MarkerFamily::ParenKana,
                open.len_utf8() + label.len_utf8() + close.len_utf8(),
            )
        });
    }

    let digits_len = inner
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if !is_item_number(&inner[..digits_len]) {
        return None;
    }
    let after = inner[digits_len..].strip_prefix(close)?;
    if options.is_disqualified(after) {
        return None;
    }
    Some((
        MarkerFamily::ParenNumeral,
        open.len_utf8() + digits_len + close.len_utf8(),
    ))
}

/// 1 through 20, without leading zeros.
fn is_item_number(digits: &str) -> bool {
    if digits.is_empty() || digits.len() > 2 || digits.starts_with('0') {
        return false;
    }
    digits.parse::<u8>().is_ok_and(|n| (1..=20).contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(prose: &str) -> (String, SeriesState) {
        let mut series = SeriesState::new();
        let out = itemize(prose, &mut series, &FormatOptions::default());
        (out, series)
    }

    #[test]
    fn circled_numerals_open_unindented_items() {
        let (out, series) = run("①あ②い");
        assert_eq!(out, "</p><p>①あ</p><p>②い");
        assert_eq!(series.families(), &[MarkerFamily::CircledNumeral]);
        assert_eq!(series.items(), 2);
    }

    #[test]
    fn first_family_gets_no_indent_later_family_does() {
        let (out, series) = run("①あ②い(1)う");
        assert_eq!(out, "</p><p>①あ</p><p>②い</p><p>&emsp;(1)う");
        assert_eq!(
            series.families(),
            &[MarkerFamily::CircledNumeral, MarkerFamily::ParenNumeral]
        );
    }

    #[test]
    fn primary_family_stays_unindented_after_nested_items() {
        let (out, _) = run("(1) (ア)a (イ)b (2)c");
        assert_eq!(
            out,
            "</p><p>(1) </p><p>&emsp;(ア)a </p><p>&emsp;(イ)b </p><p>(2)c"
        );
    }

    #[test]
    fn full_width_parens_are_markers() {
        let (out, _) = run("（1）を求めよ。（2）");
        assert_eq!(out, "</p><p>（1）を求めよ。</p><p>（2）");
    }

    #[test]
    fn cross_reference_particle_disqualifies_numeral() {
        let (out, series) = run("（1）の値を用いて、（2）を求めよ");
        assert_eq!(out, "（1）の値を用いて、</p><p>（2）を求めよ");
        assert_eq!(series.items(), 1);

        for particle in ["は", "が", "で", "と", "より", "から"] {
            let text = format!("(3){particle}");
            assert_eq!(run(&text).0, text, "particle {particle}");
        }
    }

    #[test]
    fn particles_only_disqualify_numerals() {
        let (out, _) = run("(ア)の");
        assert_eq!(out, "</p><p>(ア)の");
    }

    #[test]
    fn identifier_before_marker_blocks_it() {
        for text in ["f(1)", "x_(2)", "((1))", "a①", "9(ア)"] {
            assert_eq!(run(text).0, text);
        }
    }

    #[test]
    fn numbers_outside_range_are_not_markers() {
        for text in ["(0)", "(21)", "(01)", "(100)", "()", "(1", "(サ)"] {
            assert_eq!(run(text).0, text);
        }
        assert_eq!(run("(20)").0, "</p><p>(20)");
        assert_eq!(run("⑳").0, "</p><p>⑳");
    }

    #[test]
    fn mismatched_paren_pair_is_not_a_marker() {
        assert_eq!(run("(1）").0, "(1）");
    }

    #[test]
    fn series_state_is_threaded_across_spans() {
        let opts = FormatOptions::default();
        let mut series = SeriesState::new();
        let first = itemize(" (1) ", &mut series, &opts);
        let second = itemize(" ① ", &mut series, &opts);
        assert_eq!(first, " </p><p>(1) ");
        assert_eq!(second, " </p><p>&emsp;① ");
    }

    #[test]
    fn custom_indent_and_particles() {
        let opts = FormatOptions {
            indent: "    ".to_string(),
            disqualifying_particles: vec!["を".to_string()],
            ..FormatOptions::default()
        };
        let mut series = SeriesState::new();
        let out = itemize("①あ(1)を(2)の", &mut series, &opts);
        assert_eq!(out, "</p><p>①あ(1)を</p><p>    (2)の");
    }

    #[test]
    fn observe_reports_first_seen_rank() {
        let mut series = SeriesState::new();
        assert_eq!(series.observe(MarkerFamily::ParenKana), 0);
        assert_eq!(series.observe(MarkerFamily::CircledNumeral), 1);
        assert_eq!(series.observe(MarkerFamily::ParenKana), 0);
        assert!(series.is_primary(MarkerFamily::ParenKana));
        assert!(!series.is_primary(MarkerFamily::CircledNumeral));
        assert_eq!(series.items(), 3);
    }
}
