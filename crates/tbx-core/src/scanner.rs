//! Resilient JSON object scanner — recovers an ordered sequence of JSON
//! values from raw pasted text.
//!
//! Parsing is attempted in order: whole-input parse → character-level
//! recovery of concatenated object literals.
//!
//! Container log multiplexers routinely emit JSON objects back-to-back with
//! no wrapping array and no separators. The fallback scan recovers as many
//! well-formed objects as possible from such input while ignoring braces and
//! quotes that occur inside string values.

use serde_json::Value;

/// Scan raw text into an ordered sequence of parsed JSON values.
///
/// Fast path: the whole input parses as one JSON document. A top-level array
/// contributes its elements as-is (whatever their type); any other value
/// becomes a one-element sequence.
///
/// Fallback path: the input is treated as a concatenation of object literals
/// and recovered one balanced `{…}` span at a time. Candidate spans that fail
/// to parse are dropped, as is any incomplete trailing fragment.
///
/// Never fails: arbitrary text yields an empty sequence at worst.
pub fn scan(raw: &str) -> Vec<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return match value {
            Value::Array(items) => items,
            single => vec![single],
        };
    }
    scan_concatenated(raw)
}

/// Character-level recovery of concatenated JSON object literals.
///
/// Three pieces of state drive the scan: a signed brace depth (counted only
/// outside string literals), an in-string flag toggled by unescaped `"`, and
/// an escape-pending flag that makes the character after an unescaped `\`
/// pass through uninspected. Every character accumulates into the candidate
/// buffer; whenever depth returns to zero and the trimmed buffer ends with
/// `}`, the buffer is parsed as one value and cleared either way.
fn scan_concatenated(raw: &str) -> Vec<Value> {
    let mut values = Vec::new();
    let mut depth: i64 = 0;
    let mut current = String::new();
    let mut in_string = false;
    let mut escape_next = false;

    for ch in raw.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        if ch == '\\' {
            escape_next = true;
            current.push(ch);
            continue;
        }

        if ch == '"' {
            in_string = !in_string;
        }

        if !in_string {
            if ch == '{' {
                depth += 1;
            } else if ch == '}' {
                depth -= 1;
            }
        }

        current.push(ch);

        if depth == 0 {
            let candidate = current.trim();
            if !candidate.is_empty() && candidate.ends_with('}') {
                match serde_json::from_str::<Value>(candidate) {
                    Ok(value) => values.push(value),
                    Err(err) => {
                        // Malformed fragment: drop and keep scanning. This is
                        // best-effort recovery, not validation.
                        tracing::debug!(
                            fragment = %truncate(candidate, 100),
                            error = %err,
                            "dropping unparseable fragment"
                        );
                    }
                }
                current.clear();
            }
        }
    }

    if !current.trim().is_empty() {
        tracing::debug!(
            fragment = %truncate(current.trim(), 100),
            "dropping incomplete trailing fragment"
        );
    }

    values
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert_eq!(scan(""), Vec::<Value>::new());
    }

    #[test]
    fn whitespace_only_yields_empty_sequence() {
        assert_eq!(scan("  \n\t "), Vec::<Value>::new());
    }

    #[test]
    fn single_object_fast_path() {
        assert_eq!(scan(r#"{"log":"a"}"#), vec![json!({"log": "a"})]);
    }

    #[test]
    fn top_level_array_contributes_elements() {
        assert_eq!(
            scan(r#"[{"log":"a"},{"log":"b"}]"#),
            vec![json!({"log": "a"}), json!({"log": "b"})]
        );
    }

    #[test]
    fn array_elements_pass_through_regardless_of_type() {
        assert_eq!(
            scan(r#"[{"log":"a"}, 7, "x", null]"#),
            vec![json!({"log": "a"}), json!(7), json!("x"), json!(null)]
        );
    }

    #[test]
    fn bare_scalar_is_a_one_element_sequence() {
        assert_eq!(scan(r#""hello""#), vec![json!("hello")]);
        assert_eq!(scan("42"), vec![json!(42)]);
    }

    #[test]
    fn concatenated_objects_recovered_in_order() {
        assert_eq!(
            scan(r#"{"log":"a"}{"log":"b"}"#),
            vec![json!({"log": "a"}), json!({"log": "b"})]
        );
    }

    #[test]
    fn concatenated_objects_with_interleaved_whitespace() {
        assert_eq!(
            scan("{\"log\":\"a\"}\n  {\"log\":\"b\"}\n"),
            vec![json!({"log": "a"}), json!({"log": "b"})]
        );
    }

    #[test]
    fn braces_inside_strings_do_not_desync_depth() {
        assert_eq!(scan(r#"{"log":"a{b}c"}"#), vec![json!({"log": "a{b}c"})]);
    }

    #[test]
    fn braces_inside_strings_across_concatenated_objects() {
        assert_eq!(
            scan(r#"{"log":"}{"}{"log":"b"}"#),
            vec![json!({"log": "}{"}), json!({"log": "b"})]
        );
    }

    #[test]
    fn escaped_quote_inside_string_keeps_string_state() {
        assert_eq!(scan(r#"{"log":"a\"b"}"#), vec![json!({"log": "a\"b"})]);
    }

    #[test]
    fn escaped_backslash_before_closing_quote() {
        // The backslash escapes itself, so the following quote closes the string.
        assert_eq!(scan(r#"{"log":"a\\"}{"log":"b"}"#), vec![
            json!({"log": "a\\"}),
            json!({"log": "b"}),
        ]);
    }

    #[test]
    fn malformed_trailing_fragment_dropped_silently() {
        assert_eq!(scan(r#"{"log":"a"}{"bad"#), vec![json!({"log": "a"})]);
    }

    #[test]
    fn failed_candidate_dropped_and_scan_continues() {
        // Leading junk poisons the first candidate (it reaches depth zero
        // ending in `}` but cannot parse); the buffer resets and the next
        // object is still recovered.
        assert_eq!(
            scan(r#"junk {"a":1} {"log":"b"}"#),
            vec![json!({"log": "b"})]
        );
    }

    #[test]
    fn empty_object_between_objects() {
        assert_eq!(scan(r#"{"a":1} {} {"log":"b"}"#), vec![
            json!({"a": 1}),
            json!({}),
            json!({"log": "b"}),
        ]);
    }

    #[test]
    fn garbage_input_yields_empty_sequence() {
        assert_eq!(scan("not json at all"), Vec::<Value>::new());
        assert_eq!(scan("}{"), Vec::<Value>::new());
    }

    #[test]
    fn nested_objects_count_as_one_value() {
        assert_eq!(
            scan(r#"{"kubernetes":{"log":"x","labels":{"app":"web"}}}{"log":"y"}"#),
            vec![
                json!({"kubernetes": {"log": "x", "labels": {"app": "web"}}}),
                json!({"log": "y"}),
            ]
        );
    }

    #[test]
    fn rescan_is_idempotent() {
        let input = r#"{"log":"a"}{"log":"b"}"#;
        assert_eq!(scan(input), scan(input));
    }
}
