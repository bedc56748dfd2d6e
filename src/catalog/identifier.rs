//! Identifier extraction and normalization.
//!
//! A filename such as `ABC-123 scan.pdf` carries the identifier `ABC-123`.
//! Identifiers are compared in canonical form: uppercase letters, a single
//! space, then digits (`ABC 123`).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Letter run, optional single whitespace or hyphen, digit run.
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+[\s\-]?[0-9]+").expect("valid identifier pattern"));

/// Uppercase letter run directly followed by a digit run.
static LETTER_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([0-9]+)").expect("valid letter/digit pattern"));

/// Any run of whitespace and/or hyphens.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-]+").expect("valid separator pattern"));

/// Identifier in canonical form.
///
/// Ordered by code point, which for UTF-8 strings is the same as byte order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    /// Normalize raw text into a canonical identifier.
    ///
    /// Returns `None` when nothing is left after normalization.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Find the first identifier embedded in `filename`.
///
/// Letters match in either case; the match is returned as written, and
/// uppercasing is left to [`normalize`].
pub fn extract(filename: &str) -> Option<&str> {
    IDENTIFIER_RE
        .find(filename)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Normalize an identifier (or a user query) into canonical form.
///
/// Uppercases, separates a letter run from an adjacent digit run with a
/// space, collapses whitespace/hyphen runs into one space, and trims.
/// Idempotent.
pub fn normalize(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let split = LETTER_DIGIT_RE.replace_all(&upper, "${1} ${2}");
    let collapsed = SEPARATOR_RE.replace_all(&split, " ");
    collapsed.trim().to_string()
}
