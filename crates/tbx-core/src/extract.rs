//! Log field extractor — pulls free-text log lines out of scanned values.
//!
//! Two lookup rules, applied per value, first match wins:
//!
//! 1. a top-level `log` key holding a string, taken verbatim;
//! 2. a `kubernetes` object holding a `log` key, taken only when the nested
//!    value is a non-empty string.
//!
//! Rule 1 accepts the empty string; rule 2 rejects it. The asymmetry is
//! intentional and load-bearing — downstream consumers may depend on either
//! reading, so do not unify the rules.

use serde_json::Value;

/// Extract log text from a sequence of parsed values, preserving order.
///
/// Values that match neither rule contribute nothing; the result can be
/// shorter than the input, or empty. Never fails.
pub fn extract(values: &[Value]) -> Vec<String> {
    let mut logs = Vec::new();

    for item in values {
        let Some(obj) = item.as_object() else {
            continue;
        };

        if let Some(Value::String(log)) = obj.get("log") {
            logs.push(log.clone());
        } else if let Some(kubernetes) = obj.get("kubernetes").and_then(Value::as_object) {
            if let Some(nested) = kubernetes.get("log").and_then(Value::as_str) {
                if !nested.is_empty() {
                    logs.push(nested.to_string());
                }
            }
        }
    }

    logs
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
    fn top_level_log_string_taken_verbatim() {
        let values = vec![json!({"log": "a"})];
        assert_eq!(extract(&values), vec!["a"]);
    }

    #[test]
    fn top_level_empty_log_string_is_kept() {
        let values = vec![json!({"log": ""})];
        assert_eq!(extract(&values), vec![""]);
    }

    #[test]
    fn top_level_log_is_not_trimmed_or_reencoded() {
        let values = vec![json!({"log": "  spaced\tout\n"})];
        assert_eq!(extract(&values), vec!["  spaced\tout\n"]);
    }

    #[test]
    fn order_is_preserved() {
        let values = vec![json!({"log": "a"}), json!({"log": "b"})];
        assert_eq!(extract(&values), vec!["a", "b"]);
    }

    #[test]
    fn nested_kubernetes_log_taken_when_nonempty() {
        let values = vec![json!({"kubernetes": {"log": "x"}})];
        assert_eq!(extract(&values), vec!["x"]);
    }

    #[test]
    fn nested_kubernetes_empty_log_dropped() {
        // Asymmetric with the top-level rule on purpose.
        let values = vec![json!({"kubernetes": {"log": ""}})];
        assert_eq!(extract(&values), Vec::<String>::new());
    }

    #[test]
    fn nested_kubernetes_non_string_log_dropped() {
        let values = vec![
            json!({"kubernetes": {"log": 42}}),
            json!({"kubernetes": {"log": null}}),
        ];
        assert_eq!(extract(&values), Vec::<String>::new());
    }

    #[test]
    fn top_level_rule_wins_over_nested() {
        let values = vec![json!({"log": "outer", "kubernetes": {"log": "inner"}})];
        assert_eq!(extract(&values), vec!["outer"]);
    }

    #[test]
    fn non_string_top_level_log_falls_through_to_nested() {
        let values = vec![json!({"log": 7, "kubernetes": {"log": "inner"}})];
        assert_eq!(extract(&values), vec!["inner"]);
    }

    #[test]
    fn unmatched_values_contribute_nothing() {
        let values = vec![
            json!({"log": "a"}),
            json!({"message": "no log field"}),
            json!(["not", "an", "object"]),
            json!("scalar"),
            json!(null),
            json!({"log": "b"}),
        ];
        assert_eq!(extract(&values), vec!["a", "b"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(extract(&[]), Vec::<String>::new());
    }
}
