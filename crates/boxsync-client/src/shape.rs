//! Short, log-friendly descriptions of JSON payloads that failed to decode.

use serde_json::Value;

/// Describes the top-level shape of `value` without echoing its contents.
///
/// Objects list their keys in sorted order, arrays report their length and the shape of
/// the first element. Nested arrays and objects are described one level deep.
#[must_use]
pub fn describe_shape(value: &Value) -> String {
    match value {
        Value::Array(items) => match items.first() {
            Some(first) => format!(
                "array of {} elements (first: {})",
                items.len(),
                describe_scalar_or_keys(first)
            ),
            None => "empty array".to_owned(),
        },
        other => describe_scalar_or_keys(other),
    }
}

fn describe_scalar_or_keys(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(_) => "boolean".to_owned(),
        Value::Number(_) => "number".to_owned(),
        Value::String(_) => "string".to_owned(),
        Value::Array(items) => format!("array of {} elements", items.len()),
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            format!("object with keys [{}]", keys.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn describes_error_envelope() {
        let shape = describe_shape(&json!({"detail": "Authentication credentials were not provided."}));
        assert_eq!(shape, "object with keys [detail]");
    }

    #[test]
    fn describes_array_by_first_element() {
        let shape = describe_shape(&json!([{"pk": 1, "number": 2}, {"pk": 2}]));
        assert_eq!(shape, "array of 2 elements (first: object with keys [number, pk])");
    }

    #[test]
    fn describes_scalars() {
        assert_eq!(describe_shape(&json!(null)), "null");
        assert_eq!(describe_shape(&json!(true)), "boolean");
        assert_eq!(describe_shape(&json!(4)), "number");
        assert_eq!(describe_shape(&json!("boxes")), "string");
    }

    #[test]
    fn describes_nested_array_one_level_deep() {
        let shape = describe_shape(&json!([[1, 2, 3]]));
        assert_eq!(shape, "array of 1 elements (first: array of 3 elements)");
    }

    #[test]
    fn describes_empty_array() {
        assert_eq!(describe_shape(&json!([])), "empty array");
    }
}
