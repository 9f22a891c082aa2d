//! Field-level diffs for audit entries

use serde_json::Value;

const MAX_STRING_LEN: usize = 50;

/// Summarize top-level field changes between two JSON values
///
/// Returns `None` when nothing changed. Nested objects and arrays are
/// summarized by size rather than walked.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_field() {
        let before = json!({"description": "Rent", "amount": "1200.00"});
        let after = json!({"description": "Rent", "amount": "1250.00"});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: \"1200.00\" -> \"1250.00\"");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"display_name": "Sam", "email": "sam@example.com"});
        let after = json!({"display_name": "Sam", "category": "Food"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("email: \"sam@example.com\" -> (removed)"));
        assert!(diff.contains("category: (added) -> \"Food\""));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Flat", "invite_code": "ABC123"});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_participants_summarized() {
        let before = json!({"participants": ["a", "b"]});
        let after = json!({"participants": ["a", "b", "c"]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "participants: [2 items] -> [3 items]");
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!(true), &json!(true)).is_none());
    }

    #[test]
    fn test_long_string_truncated_on_char_boundary() {
        let long = "é".repeat(80);
        let diff = generate_diff(&json!({"d": long}), &json!({"d": "short"})).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
