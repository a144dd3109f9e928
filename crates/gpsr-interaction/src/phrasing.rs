//! Strict parser for the model's phrasing-list replies.

use std::borrow::Cow;

use gpsr_core::error::{GpsrError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static THINK_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
static NUMBERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s*").expect("valid regex"));

/// Parses a model reply into an ordered list of phrasings.
///
/// Models that emit visible reasoning get their `<think>...</think>` span
/// stripped first. Every remaining non-empty line must be a markdown list
/// item (`- `, `* `, or a leading `1.`-style numeral); anything else fails
/// the whole parse rather than letting a garbled line reach the display.
/// The parser does not enforce an item count.
pub fn parse_phrasings(reply: &str) -> Result<Vec<String>> {
    let body: Cow<'_, str> = if reply.starts_with("<think") {
        THINK_SPAN.replace_all(reply, "")
    } else {
        Cow::Borrowed(reply)
    };

    let mut phrasings = Vec::new();
    for line in body.lines() {
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("- ") {
            phrasings.push(rest.to_string());
        } else if let Some(rest) = line.strip_prefix("* ") {
            phrasings.push(rest.to_string());
        } else if let Some(marker) = NUMBERED_MARKER.find(line) {
            phrasings.push(line[marker.end()..].to_string());
        } else {
            return Err(GpsrError::Parse {
                line: line.to_string(),
                reply: reply.to_string(),
            });
        }
    }
    Ok(phrasings)
}
