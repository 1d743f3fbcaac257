use serde_json::{Map, Value};

use crate::core::ParsedEntry;

use super::number::parse_leading_float;

const LABEL_KEYS: [&str; 3] = ["label", "name", "x"];
const VALUE_KEYS: [&str; 3] = ["value", "y", "amount"];
const DEFAULT_LABEL: &str = "Item";

/// Reads a JSON array of records.
///
/// Returns `None` when the text is not JSON or is JSON but not an array, so
/// detection can move on to the next reader.
pub(super) fn parse_json_array(text: &str) -> Option<Vec<ParsedEntry>> {
    let Value::Array(items) = serde_json::from_str::<Value>(text).ok()? else {
        return None;
    };

    let entries = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(fields) => record_entry(fields),
            scalar => coerce_number(scalar).and_then(|value| {
                ParsedEntry::new(format!("{DEFAULT_LABEL} {}", index + 1), value)
            }),
        })
        .collect();
    Some(entries)
}

fn record_entry(fields: &Map<String, Value>) -> Option<ParsedEntry> {
    let label = LABEL_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(label_text)
        .unwrap_or_else(|| DEFAULT_LABEL.to_owned());

    let value = match VALUE_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|raw| !raw.is_null())
    {
        Some(raw) => coerce_number(raw)?,
        None => 0.0,
    };
    ParsedEntry::new(label, value)
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        Value::String(text) => parse_leading_float(text),
        _ => None,
    }
}
