//! Converts every accepted input shape into [`ChartData`].
//!
//! Accepted shapes: parsed entries, flat scalar arrays, arrays of records,
//! `{rows, columns}` tables, `{values, labels?, label?}` passthroughs,
//! plain `{label: number}` maps and already-canonical `{labels, datasets}`
//! documents. Canonical input is a fixed point: normalizing the output of a
//! previous normalization yields the same data.
//!
//! For label-indexed kinds every dataset leaves with exactly one value per
//! label: short datasets are padded with nulls, long ones truncated, and a
//! document without labels gets `Item n` labels for its longest dataset.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::core::{
    ChartData, ChartKind, ColorFill, DataValue, Dataset, DatasetColors, default_dataset_colors,
};
use crate::ingest::ParseOutcome;

/// Input accepted by [`normalize`].
#[derive(Debug, Clone, Copy)]
pub enum RawShape<'a> {
    Parsed(&'a ParseOutcome),
    Json(&'a Value),
    Canonical(&'a ChartData),
}

#[must_use]
pub fn normalize(input: RawShape<'_>, kind: ChartKind) -> ChartData {
    match input {
        RawShape::Parsed(outcome) => from_parsed(outcome),
        RawShape::Json(value) => normalize_json(value, kind),
        RawShape::Canonical(data) => align_to_labels(complete_canonical(data), kind),
    }
}

#[must_use]
pub fn normalize_json(value: &Value, kind: ChartKind) -> ChartData {
    let data = match value {
        Value::Array(items) => from_array(items, kind),
        Value::Object(fields) if fields.contains_key("datasets") => from_canonical_json(fields),
        Value::Object(fields) if fields.contains_key("rows") && fields.contains_key("columns") => {
            from_table(fields)
        }
        Value::Object(fields) if fields.contains_key("values") => from_values(fields),
        Value::Object(fields) if fields.values().all(is_scalar) && !fields.is_empty() => {
            from_label_map(fields)
        }
        other => {
            debug!(shape = json_kind(other), "unrecognized input shape; producing empty data");
            ChartData::default()
        }
    };
    let data = align_to_labels(data, kind);
    trace!(
        labels = data.labels.len(),
        datasets = data.datasets.len(),
        "normalized json input"
    );
    data
}

fn align_to_labels(mut data: ChartData, kind: ChartKind) -> ChartData {
    if kind.is_point_based() {
        return data;
    }
    if data.labels.is_empty() {
        let longest = data
            .datasets
            .iter()
            .map(|dataset| dataset.data.len())
            .max()
            .unwrap_or(0);
        data.labels = synthesized_item_labels(longest);
    }

    let expected = data.labels.len();
    for dataset in &mut data.datasets {
        if dataset.data.len() != expected {
            debug!(
                dataset = %dataset.label,
                values = dataset.data.len(),
                labels = expected,
                "aligning dataset to labels"
            );
            dataset.data.resize(expected, DataValue::Null);
        }
    }
    data
}

fn from_parsed(outcome: &ParseOutcome) -> ChartData {
    let label = outcome
        .series_label
        .clone()
        .unwrap_or_else(|| synthesized_dataset_label(0));
    ChartData {
        labels: outcome.entries.iter().map(|entry| entry.label.clone()).collect(),
        datasets: vec![dataset(
            0,
            label,
            outcome
                .entries
                .iter()
                .map(|entry| DataValue::Number(entry.value))
                .collect(),
        )],
    }
}

fn from_array(items: &[Value], kind: ChartKind) -> ChartData {
    let Some(first) = items.first() else {
        return ChartData::default();
    };

    match first {
        Value::Object(fields) if kind.is_point_based() && is_point_record(fields) => {
            ChartData {
                labels: Vec::new(),
                datasets: vec![dataset(
                    0,
                    synthesized_dataset_label(0),
                    items.iter().map(DataValue::from_json).collect(),
                )],
            }
        }
        Value::Object(fields) => from_records(items, fields.keys().cloned().collect()),
        _ => ChartData {
            labels: synthesized_item_labels(items.len()),
            datasets: vec![dataset(
                0,
                synthesized_dataset_label(0),
                items.iter().map(DataValue::from_json).collect(),
            )],
        },
    }
}

/// Records keyed like the first element. The first key provides labels,
/// the rest become datasets; a single key holds values with synthesized
/// labels.
fn from_records(items: &[Value], keys: Vec<String>) -> ChartData {
    let field = |item: &Value, key: &str| item.get(key).cloned().unwrap_or(Value::Null);

    match keys.as_slice() {
        [] => ChartData::default(),
        [only] => ChartData {
            labels: synthesized_item_labels(items.len()),
            datasets: vec![dataset(
                0,
                only.clone(),
                items
                    .iter()
                    .map(|item| DataValue::from_json(&field(item, only)))
                    .collect(),
            )],
        },
        [label_key, series_keys @ ..] => ChartData {
            labels: items
                .iter()
                .map(|item| label_text(&field(item, label_key)))
                .collect(),
            datasets: series_keys
                .iter()
                .enumerate()
                .map(|(index, key)| {
                    dataset(
                        index,
                        key.clone(),
                        items
                            .iter()
                            .map(|item| DataValue::from_json(&field(item, key)))
                            .collect(),
                    )
                })
                .collect(),
        },
    }
}

fn from_table(fields: &Map<String, Value>) -> ChartData {
    let columns: Vec<String> = fields
        .get("columns")
        .and_then(Value::as_array)
        .map(|columns| columns.iter().map(label_text).collect())
        .unwrap_or_default();
    let rows = fields
        .get("rows")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let cell = |row: &Value, column: usize| -> Value {
        match row {
            Value::Array(cells) => cells.get(column).cloned().unwrap_or(Value::Null),
            Value::Object(named) => columns
                .get(column)
                .and_then(|name| named.get(name))
                .cloned()
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    };

    if columns.is_empty() {
        return ChartData::default();
    }

    ChartData {
        labels: rows.iter().map(|row| label_text(&cell(row, 0))).collect(),
        datasets: columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(column, name)| {
                dataset(
                    column - 1,
                    name.clone(),
                    rows.iter()
                        .map(|row| DataValue::from_json(&cell(row, column)))
                        .collect(),
                )
            })
            .collect(),
    }
}

fn from_values(fields: &Map<String, Value>) -> ChartData {
    let values: Vec<DataValue> = match fields.get("values") {
        Some(Value::Array(items)) => items.iter().map(DataValue::from_json).collect(),
        Some(scalar) => vec![DataValue::from_json(scalar)],
        None => Vec::new(),
    };
    let labels = match fields.get("labels") {
        Some(Value::Array(labels)) => labels.iter().map(label_text).collect(),
        _ => synthesized_item_labels(values.len()),
    };
    let label = fields
        .get("label")
        .and_then(Value::as_str)
        .filter(|label| !label.trim().is_empty())
        .map_or_else(|| synthesized_dataset_label(0), str::to_owned);

    ChartData {
        labels,
        datasets: vec![dataset(0, label, values)],
    }
}

fn from_label_map(fields: &Map<String, Value>) -> ChartData {
    ChartData {
        labels: fields.keys().cloned().collect(),
        datasets: vec![dataset(
            0,
            synthesized_dataset_label(0),
            fields.values().map(DataValue::from_json).collect(),
        )],
    }
}

fn from_canonical_json(fields: &Map<String, Value>) -> ChartData {
    let labels = match fields.get("labels") {
        Some(Value::Array(labels)) => labels.iter().map(label_text).collect(),
        _ => Vec::new(),
    };
    let datasets = match fields.get("datasets") {
        Some(Value::Array(datasets)) => datasets
            .iter()
            .enumerate()
            .map(|(index, raw)| canonical_dataset(index, raw))
            .collect(),
        _ => Vec::new(),
    };
    ChartData { labels, datasets }
}

fn canonical_dataset(index: usize, raw: &Value) -> Dataset {
    match raw {
        Value::Object(fields) => {
            let label = fields
                .get("label")
                .and_then(Value::as_str)
                .filter(|label| !label.trim().is_empty())
                .map_or_else(|| synthesized_dataset_label(index), str::to_owned);
            let data = match fields.get("data") {
                Some(Value::Array(items)) => items.iter().map(DataValue::from_json).collect(),
                _ => Vec::new(),
            };
            let colors = supplied_colors(fields).unwrap_or_else(|| default_dataset_colors(index));
            Dataset { label, data, colors }
        }
        Value::Array(items) => dataset(
            index,
            synthesized_dataset_label(index),
            items.iter().map(DataValue::from_json).collect(),
        ),
        _ => dataset(index, synthesized_dataset_label(index), Vec::new()),
    }
}

fn supplied_colors(fields: &Map<String, Value>) -> Option<DatasetColors> {
    let background_color = match fields.get("backgroundColor")? {
        Value::String(color) => ColorFill::Single(color.clone()),
        Value::Array(colors) => ColorFill::PerPoint(
            colors
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        ),
        _ => return None,
    };
    let border_color = fields
        .get("borderColor")
        .and_then(Value::as_str)
        .map(str::to_owned);
    Some(DatasetColors {
        background_color,
        border_color,
    })
}

/// Completes an in-memory canonical document the same way JSON input is
/// completed: blank labels are synthesized, colors are kept.
fn complete_canonical(data: &ChartData) -> ChartData {
    ChartData {
        labels: data.labels.clone(),
        datasets: data
            .datasets
            .iter()
            .enumerate()
            .map(|(index, dataset)| Dataset {
                label: if dataset.label.trim().is_empty() {
                    synthesized_dataset_label(index)
                } else {
                    dataset.label.clone()
                },
                data: dataset.data.clone(),
                colors: dataset.colors.clone(),
            })
            .collect(),
    }
}

fn dataset(index: usize, label: String, data: Vec<DataValue>) -> Dataset {
    Dataset {
        label: if label.trim().is_empty() {
            synthesized_dataset_label(index)
        } else {
            label
        },
        data,
        colors: default_dataset_colors(index),
    }
}

fn synthesized_dataset_label(index: usize) -> String {
    format!("Dataset {}", index + 1)
}

fn synthesized_item_labels(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Item {n}")).collect()
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

fn is_point_record(fields: &Map<String, Value>) -> bool {
    fields.contains_key("x") && fields.contains_key("y")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{label_text, synthesized_item_labels};

    #[test]
    fn labels_render_scalars_without_quotes() {
        assert_eq!(label_text(&json!("Jan")), "Jan");
        assert_eq!(label_text(&json!(2024)), "2024");
        assert_eq!(label_text(&json!(null)), "");
    }

    #[test]
    fn item_labels_are_one_based() {
        assert_eq!(synthesized_item_labels(2), ["Item 1", "Item 2"]);
    }
}
