use serde_json::Value;

pub fn trim_all_strings(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, trim_all_strings(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(trim_all_strings).collect()),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.len() == text.len() {
                Value::String(text)
            } else {
                Value::String(trimmed.to_string())
            }
        }
        scalar => scalar,
    }
}
