//! Structured field extraction from semi-structured review passages.
//!
//! The ingestion pipeline emits review text in a handful of loose shapes:
//! labeled lines (`Reviewer:`, `Rating:`, `Date:`, `Review:`) and embedded
//! structured fragments (`displayName: '...'`). The four extractions are
//! independent pattern matches over the same raw string; a missing field
//! never blocks the others and [`parse`] never fails.


use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DISPLAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"displayName\s*:\s*['"]([^'"]+)['"]"#).expect("displayName pattern is valid")
});

static REVIEWER_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*reviewer[ \t]*:[ \t]*(.+)$").expect("reviewer pattern is valid")
});

static RATING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rating\s*:\s*(\d+(?:\.\d+)?)").expect("rating pattern is valid")
});

static RATING_OUT_OF_FIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*/\s*5\b").expect("rating-out-of-five pattern is valid")
});

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("iso date pattern is valid"));

static DATE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*date[ \t]*:[ \t]*(.+)$").expect("date pattern is valid")
});

static BODY_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:review|comment)[ \t]*:[ \t]*").expect("body pattern is valid")
});

/// Structured view of a review passage.
///
/// Derived deterministically from raw content; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReview {
    /// Reviewer display name, if present.
    pub reviewer: Option<String>,
    /// Star rating in `[0, 5]`, if present and in range.
    pub rating: Option<f32>,
    /// Review date (ISO `YYYY-MM-DD` preferred), if present.
    pub date: Option<String>,
    /// Review body. Never empty for non-blank input.
    pub text: String,
    /// Source URL, attached by the caller when known.
    pub source_url: Option<String>,
}

impl ParsedReview {
    /// Attaches the source URL.
    pub fn with_source_url(mut self, url: Option<String>) -> Self {
        self.source_url = url;
        self
    }
}

fn extract_reviewer(raw: &str) -> Option<String> {
    let captured = DISPLAY_NAME_RE
        .captures(raw)
        .or_else(|| REVIEWER_LINE_RE.captures(raw))?;

    let value = captured.get(1)?.as_str().trim().trim_matches(['\'', '"']);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn extract_rating(raw: &str) -> Option<f32> {
    let captured = RATING_LABEL_RE
        .captures(raw)
        .or_else(|| RATING_OUT_OF_FIVE_RE.captures(raw))?;

    let value: f32 = captured.get(1)?.as_str().parse().ok()?;
    // Out-of-range matches are discarded, not clamped.
    if (0.0..=5.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

fn extract_date(raw: &str) -> Option<String> {
    if let Some(captured) = ISO_DATE_RE.captures(raw) {
        return Some(captured.get(1)?.as_str().to_string());
    }

    // No other date formats are parsed. Label values pass through verbatim;
    // guessing formats here has historically produced wrong dates.
    let captured = DATE_LINE_RE.captures(raw)?;
    let value = captured.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn extract_body(raw: &str) -> String {
    if let Some(found) = BODY_LABEL_RE.find(raw) {
        let body = raw[found.end()..].trim();
        if !body.is_empty() {
            return body.to_string();
        }
    }

    raw.trim().to_string()
}

/// Parses a raw review passage into its structured fields.
///
/// Tolerates absence of any subset of fields; the body falls back to the
/// whole trimmed input, so `text` is non-empty whenever the input is.
pub fn parse(raw: &str) -> ParsedReview {
    ParsedReview {
        reviewer: extract_reviewer(raw),
        rating: extract_rating(raw),
        date: extract_date(raw),
        text: extract_body(raw),
        source_url: None,
    }
}
