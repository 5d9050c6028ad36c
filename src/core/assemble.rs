//! Paragraph assembly

use lazy_static::lazy_static;
use regex::Regex;

pub const PARAGRAPH_OPEN: &str = "<p>";
pub const PARAGRAPH_CLOSE: &str = "</p>";

lazy_static! {
    static ref EMPTY_PARAGRAPHS: Regex = Regex::new(r"(?:<p>\s*</p>)+").unwrap();
}

/// Join processed spans, wrap them in one paragraph, and drop the empty
/// paragraphs left behind by leading or back-to-back item markers.
pub fn assemble<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut html = String::from(PARAGRAPH_OPEN);
    for part in parts {
        html.push_str(part.as_ref());
    }
    html.push_str(PARAGRAPH_CLOSE);
    EMPTY_PARAGRAPHS.replace_all(&html, "").into_owned()
}
