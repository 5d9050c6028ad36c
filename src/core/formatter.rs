//! Problem-text formatter
//!
//! Drives one text through the pipeline: split into prose and math spans,
//! itemize prose, promote fractions in math, then assemble paragraphs.

use super::assemble::assemble;
use super::itemize::{itemize, SeriesState};
use super::normalize::normalize;
use super::options::FormatOptions;
use super::promote::promote_counted;
use super::split::split;
use crate::utils::report::{FormatReport, FormatStats};

/// Reusable formatter. Holds only immutable options, so one instance can serve
/// any number of texts, including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ProblemFormatter {
    options: FormatOptions,
}

impl ProblemFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Format already-normalized text into paragraph markup.
    ///
    /// Absent, empty and whitespace-only text yields `""`.
    pub fn format(&self, text: Option<&str>) -> String {
        self.format_with_report(text).content
    }

    pub fn format_with_report(&self, text: Option<&str>) -> FormatReport {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return FormatReport::default();
        };

        let mut series = SeriesState::new();
        let mut stats = FormatStats::default();
        let mut parts = Vec::new();

        for span in split(text) {
            if !span.is_math() {
                stats.prose_spans += 1;
                parts.push(itemize(span.content, &mut series, &self.options));
                continue;
            }
            stats.math_spans += 1;
            if self.options.promote_fractions {
                let (math, counts) = promote_counted(span.content);
                stats.promoted_fractions += counts.promoted;
                stats.compact_fractions += counts.compact;
                parts.push(math);
            } else {
                parts.push(span.content.to_string());
            }
        }

        stats.items = series.items();
        stats.families = series.families().to_vec();
        let content = assemble(&parts);

        log::debug!(
            "formatted problem text: {} prose / {} math spans, {} items",
            stats.prose_spans,
            stats.math_spans,
            stats.items
        );

        FormatReport::new(content, stats)
    }

    /// Normalize (unless disabled in the options) and format.
    pub fn normalize_and_format(&self, text: Option<&str>) -> FormatReport {
        match text {
            Some(raw) if self.options.normalize => {
                let normalized = normalize(raw);
                self.format_with_report(Some(&normalized))
            }
            other => self.format_with_report(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::itemize::MarkerFamily;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_and_blank_text_format_to_empty() {
        let f = ProblemFormatter::new();
        assert_eq!(f.format(None), "");
        assert_eq!(f.format(Some("")), "");
        assert_eq!(f.format(Some("  \n\t")), "");
    }

    #[test]
    fn prose_only_text_is_wrapped() {
        let f = ProblemFormatter::new();
        assert_eq!(f.format(Some("次の問いに答えよ。")), "<p>次の問いに答えよ。</p>");
    }

    #[test]
    fn series_state_is_fresh_per_call() {
        let f = ProblemFormatter::new();
        let first = f.format(Some("(1) a"));
        let second = f.format(Some("① b (1) c"));
        let third = f.format(Some("(1) d"));
        assert_eq!(first, "<p>(1) a</p>");
        assert_eq!(second, "<p>① b </p><p>&emsp;(1) c</p>");
        assert_eq!(third, first.replace('a', "d"));
    }

    #[test]
    fn markers_inside_math_are_not_items() {
        let f = ProblemFormatter::new();
        assert_eq!(f.format(Some(r"\((1)+①\)")), r"<p>\((1)+①\)</p>");
    }

    #[test]
    fn promotion_can_be_disabled() {
        let f = ProblemFormatter::with_options(FormatOptions::plain());
        let report = f.format_with_report(Some(r"① \(\frac{a}{b}\) (1) x"));
        assert_eq!(
            report.content,
            r"<p>① \(\frac{a}{b}\) </p><p>(1) x</p>"
        );
        assert_eq!(report.stats.promoted_fractions, 0);
        assert_eq!(report.stats.math_spans, 1);
    }

    #[test]
    fn report_counts_spans_items_and_fractions() {
        let f = ProblemFormatter::new();
        let report = f.format_with_report(Some(
            r"(ア) \(\frac{1}{\frac{2}{3}}\) (1) \(x\)",
        ));
        assert_eq!(
            report.stats,
            FormatStats {
                prose_spans: 3,
                math_spans: 2,
                items: 2,
                families: vec![MarkerFamily::ParenKana, MarkerFamily::ParenNumeral],
                promoted_fractions: 1,
                compact_fractions: 1,
            }
        );
    }

    #[test]
    fn normalize_and_format_respects_option() {
        let raw = "値$x$";
        let f = ProblemFormatter::new();
        assert_eq!(f.normalize_and_format(Some(raw)).content, r"<p>値 \(x\)</p>");

        let f = ProblemFormatter::with_options(FormatOptions {
            normalize: false,
            ..FormatOptions::default()
        });
        assert_eq!(f.normalize_and_format(Some(raw)).content, "<p>値$x$</p>");
    }
}
