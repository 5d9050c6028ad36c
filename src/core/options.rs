//! Formatting options
//!
//! Everything the pipeline treats as data rather than logic lives here, so a
//! caller can tune indentation or the cross-reference particles without
//! touching the scanners.

/// Default indent token inserted before items of a secondary marker family.
pub const DEFAULT_INDENT: &str = "&emsp;";

/// Particles that mark a parenthesized numeral as a cross-reference.
///
/// `（1）の値` refers back to item (1); it does not open a new one. The list is
/// inherited from the problem corpus and is matched by prefix, so `の値` is
/// already covered by `の` but kept for parity with the source data.
pub const DEFAULT_DISQUALIFYING_PARTICLES: &[&str] =
    &["の", "は", "が", "で", "と", "より", "から", "の値"];

/// Options for problem-text formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Token placed after `<p>` for items of any family other than the first
    /// one seen. Default: `&emsp;`
    pub indent: String,

    /// Suffixes that disqualify a parenthesized numeral from being an item.
    pub disqualifying_particles: Vec<String>,

    /// Rewrite top-level `\frac` to `\dfrac` inside math spans.
    /// Default: true
    pub promote_fractions: bool,

    /// Run the delimiter normalizer before formatting (free functions only).
    /// Default: true
    pub normalize: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            disqualifying_particles: DEFAULT_DISQUALIFYING_PARTICLES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            promote_fractions: true,
            normalize: true,
        }
    }
}

impl FormatOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph splitting only: no indent token and no display fractions.
    pub fn plain() -> Self {
        Self {
            indent: String::new(),
            promote_fractions: false,
            ..Self::default()
        }
    }

    /// True when `rest` begins with one of the disqualifying particles.
    pub(crate) fn is_disqualified(&self, rest: &str) -> bool {
        self.disqualifying_particles
            .iter()
            .any(|p| !p.is_empty() && rest.starts_with(p.as_str()))
    }
}
