use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One `(label, value)` pair extracted from raw input.
///
/// `value` is always finite; non-finite values never make it past
/// [`ParsedEntry::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub label: String,
    pub value: f64,
}

impl ParsedEntry {
    /// Builds an entry, rejecting empty labels and non-finite values.
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Option<Self> {
        let label: String = label.into();
        let label = label.trim();
        if label.is_empty() || !value.is_finite() {
            return None;
        }
        Some(Self {
            label: label.to_owned(),
            value,
        })
    }
}

/// Correlation-style record used by scatter and bubble charts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl PointRecord {
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            r: None,
        }
    }

    #[must_use]
    pub fn xyr(x: f64, y: f64, r: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            r: Some(r),
        }
    }

    /// Returns the first required key that is absent, in `x`, `y`, `r` order.
    #[must_use]
    pub fn first_missing(&self, require_radius: bool) -> Option<&'static str> {
        if self.x.is_none() {
            Some("x")
        } else if self.y.is_none() {
            Some("y")
        } else if require_radius && self.r.is_none() {
            Some("r")
        } else {
            None
        }
    }
}

/// A single element of a dataset's `data` sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Null,
    Number(f64),
    Text(String),
    Tuple(Vec<f64>),
    Point(PointRecord),
}

impl DataValue {
    /// Converts one loosely-typed JSON element.
    ///
    /// Numeric strings become numbers, other strings are kept verbatim,
    /// arrays keep their numeric members and objects are read as
    /// `{x, y, r}` records.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Number(if *flag { 1.0 } else { 0.0 }),
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::String(text) => match finite_number(text) {
                Some(number) => Self::Number(number),
                None => Self::Text(text.clone()),
            },
            Value::Array(items) => Self::Tuple(items.iter().filter_map(json_number).collect()),
            Value::Object(fields) => Self::Point(PointRecord {
                x: fields.get("x").and_then(json_number),
                y: fields.get("y").and_then(json_number),
                r: fields.get("r").and_then(json_number),
            }),
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Null and blank-string entries count as missing for quality checks.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

fn finite_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => finite_number(text),
        _ => None,
    }
}

/// Fill color: one color for the whole dataset or one per slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorFill {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetColors {
    pub background_color: ColorFill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DataValue>,
    #[serde(flatten)]
    pub colors: DatasetColors,
}

/// Canonical `{labels, datasets}` shape every stage after normalization
/// consumes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Sum of every dataset's point count.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.datasets.iter().map(|dataset| dataset.data.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.datasets.iter().all(|dataset| dataset.data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DataValue, ParsedEntry, PointRecord};

    #[test]
    fn parsed_entry_rejects_non_finite_and_blank_labels() {
        assert!(ParsedEntry::new("a", f64::NAN).is_none());
        assert!(ParsedEntry::new("a", f64::INFINITY).is_none());
        assert!(ParsedEntry::new("   ", 1.0).is_none());
        assert_eq!(
            ParsedEntry::new(" Jan ", 3.0).map(|entry| entry.label),
            Some("Jan".to_owned())
        );
    }

    #[test]
    fn numeric_strings_become_numbers_but_nan_text_does_not() {
        assert_eq!(DataValue::from_json(&json!(" 12.5 ")), DataValue::Number(12.5));
        assert_eq!(
            DataValue::from_json(&json!("NaN")),
            DataValue::Text("NaN".to_owned())
        );
    }

    #[test]
    fn objects_read_as_point_records() {
        assert_eq!(
            DataValue::from_json(&json!({"x": 1, "y": "2"})),
            DataValue::Point(PointRecord::xy(1.0, 2.0))
        );
        assert_eq!(
            PointRecord::xy(1.0, 2.0).first_missing(true),
            Some("r")
        );
    }

    #[test]
    fn serialized_values_read_back_unchanged() {
        for value in [
            DataValue::Null,
            DataValue::Number(-3.25),
            DataValue::Text(String::new()),
            DataValue::Tuple(vec![1.0, 2.0]),
            DataValue::Point(PointRecord::xyr(1.0, 2.0, 3.0)),
        ] {
            let json = serde_json::to_value(&value).expect("serialize value");
            assert_eq!(DataValue::from_json(&json), value);
        }
    }
}
