//! Formatting reports: what the pipeline did to one problem text.

use serde::Serialize;

use crate::core::itemize::MarkerFamily;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormatStats {
    pub prose_spans: usize,
    pub math_spans: usize,
    /// Item markers turned into paragraphs.
    pub items: usize,
    /// Marker families in first-seen order; the first one is unindented.
    pub families: Vec<MarkerFamily>,
    pub promoted_fractions: usize,
    pub compact_fractions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    pub content: String,
    pub stats: FormatStats,
}

impl FormatReport {
    pub fn new(content: String, stats: FormatStats) -> Self {
        Self { content, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
