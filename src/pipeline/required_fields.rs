use serde_json::Value;

/// Null, `""`, `[]` and `{}` all count as absent.
pub(super) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Returns the error for the first required field that is missing or blank.
/// An empty array in `list_field` passes; the section check reports it.
pub(super) fn find_missing_required_field(
    record: &Value,
    required: &[String],
    list_field: &str,
) -> Option<String> {
    let Some(object) = record.as_object() else {
        let found = json_type_name(record);
        return Some(match required.first() {
            Some(field) => format!(
                "Missing or empty required field: '{field}' (record root is {found}, not an object)"
            ),
            None => format!("Record root is {found}, not an object"),
        });
    };

    required
        .iter()
        .find(|field| match object.get(field.as_str()) {
            Some(Value::Array(_)) if field.as_str() == list_field => false,
            value => value.is_none_or(is_blank),
        })
        .map(|field| format!("Missing or empty required field: '{field}'"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
