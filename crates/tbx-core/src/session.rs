//! Extraction session — orchestrates scanner → extractor for one request.
//!
//! A session is stateless: each [`run`] call allocates its own buffers and
//! returns a self-contained [`ExtractionOutcome`]. The shell renders the
//! outcome and discards it; nothing is carried between requests.

use crate::{extract, scanner};
use serde_json::Value;

/// How many characters of the first parsed value to include in the
/// no-match diagnostic.
const SAMPLE_LIMIT: usize = 300;

/// Derived statistics for a successful extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Number of log lines recovered.
    pub total_count: usize,
    /// Character length of the newline-joined output (lines + separators).
    pub char_count: usize,
}

/// Result of one extraction request.
///
/// Every failure path is a value with a user-facing message; the session
/// never panics and never returns `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// At least one log line was recovered.
    Extracted {
        /// The recovered lines joined with `\n`.
        text: String,
        stats: ExtractionStats,
    },
    /// The input was blank; the scanner was never invoked.
    EmptyInput { message: String },
    /// Scanning succeeded (possibly recovering zero values) but no value
    /// matched an extraction rule.
    NoLogFields { message: String },
}

impl ExtractionOutcome {
    /// The text the shell should display, whatever the outcome.
    pub fn display_text(&self) -> &str {
        match self {
            ExtractionOutcome::Extracted { text, .. } => text,
            ExtractionOutcome::EmptyInput { message }
            | ExtractionOutcome::NoLogFields { message } => message,
        }
    }

    /// Whether the outcome should render in the error style.
    pub fn is_error(&self) -> bool {
        !matches!(self, ExtractionOutcome::Extracted { .. })
    }

    /// Statistics, present only for successful extractions.
    pub fn stats(&self) -> Option<ExtractionStats> {
        match self {
            ExtractionOutcome::Extracted { stats, .. } => Some(*stats),
            _ => None,
        }
    }
}

/// Run one extraction request over raw pasted text.
pub fn run(raw: &str) -> ExtractionOutcome {
    let input = raw.trim();

    if input.is_empty() {
        return ExtractionOutcome::EmptyInput {
            message: "Paste JSON data first.".to_string(),
        };
    }

    let values = scanner::scan(input);
    tracing::debug!(parsed = values.len(), "scan complete");

    let logs = extract::extract(&values);
    if logs.is_empty() {
        return ExtractionOutcome::NoLogFields {
            message: no_match_message(&values),
        };
    }

    let text = logs.join("\n");
    let stats = ExtractionStats {
        total_count: logs.len(),
        char_count: text.chars().count(),
    };
    tracing::debug!(
        total_count = stats.total_count,
        char_count = stats.char_count,
        "extraction complete"
    );

    ExtractionOutcome::Extracted { text, stats }
}

/// Diagnostic for inputs that parsed but matched no extraction rule:
/// the parsed-value count plus, when available, the first value's key set
/// and a truncated pretty-printed sample.
fn no_match_message(values: &[Value]) -> String {
    let mut message = format!(
        "No \"log\" field found in the provided JSON data.\n\nParsed {} objects.\n\n",
        values.len()
    );

    if let Some(first) = values.first() {
        if let Some(obj) = first.as_object() {
            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            message.push_str(&format!("First object keys: {}\n\n", keys.join(", ")));
        }
        let pretty =
            serde_json::to_string_pretty(first).unwrap_or_else(|_| first.to_string());
        let sample: String = pretty.chars().take(SAMPLE_LIMIT).collect();
        message.push_str(&format!("Sample object:\n{sample}..."));
    }

    message
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
