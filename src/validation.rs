use serde::Serialize;
use tracing::debug;

use crate::core::{ChartData, ChartKind, DataValue, Dataset};

/// Pie-like charts get hard to read past this many slices.
pub const MAX_SLICE_CATEGORIES: usize = 10;
/// Share of missing entries (percent) above which a dataset is flagged.
pub const MISSING_VALUE_WARN_PERCENT: f64 = 20.0;
/// Per-point structural errors reported before the rest are summarized.
pub const MAX_REPORTED_POINT_ERRORS: usize = 10;

/// Outcome of [`validate`].
///
/// `errors` block rendering; `warnings` and `suggestions` never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}

impl ValidationResult {
    fn error(&mut self, message: String) {
        self.is_valid = false;
        self.errors.push(message);
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn suggest(&mut self, message: String) {
        self.suggestions.push(message);
    }
}

/// Runs structural checks for `kind` and chart-independent quality checks.
#[must_use]
pub fn validate(data: &ChartData, kind: ChartKind) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_structure(data, kind, &mut result);
    check_quality(data, &mut result);
    debug!(
        chart_kind = %kind,
        is_valid = result.is_valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated chart data"
    );
    result
}

fn check_structure(data: &ChartData, kind: ChartKind, result: &mut ValidationResult) {
    let categories = data.labels.len();
    match kind {
        ChartKind::Pie | ChartKind::Doughnut => {
            if data.datasets.len() > 1 {
                result.warn(format!(
                    "{kind} charts show a single dataset; {} were provided",
                    data.datasets.len()
                ));
                result.suggest("Combine the datasets or switch to a bar chart".to_owned());
            }
            check_slice_count(kind, categories, result);
        }
        ChartKind::PolarArea => check_slice_count(kind, categories, result),
        ChartKind::Line | ChartKind::Area => {
            if data.datasets.is_empty() {
                result.error(format!("{kind} charts require at least one dataset"));
            }
            if categories < 2 {
                result.warn(format!(
                    "{kind} charts need at least 2 points to show a trend; found {categories}"
                ));
            }
        }
        ChartKind::Scatter => check_points(data, 2, false, result),
        ChartKind::Bubble => check_points(data, 3, true, result),
        ChartKind::Radar => {
            if categories < 3 {
                result.warn(format!(
                    "radar charts need at least 3 axes; found {categories}"
                ));
            }
        }
        ChartKind::Bar => {}
    }

    if !kind.is_point_based() {
        for dataset in &data.datasets {
            if !dataset.data.is_empty() && dataset.data.len() != categories {
                result.warn(format!(
                    "dataset '{}' has {} values for {categories} labels",
                    dataset.label,
                    dataset.data.len()
                ));
            }
        }
    }
}

fn check_slice_count(kind: ChartKind, categories: usize, result: &mut ValidationResult) {
    if categories > MAX_SLICE_CATEGORIES {
        result.warn(format!(
            "{kind} chart has {categories} categories; more than {MAX_SLICE_CATEGORIES} is hard to read"
        ));
        result.suggest(
            "Group small categories into \"Other\" or switch to a bar chart".to_owned(),
        );
    }
}

fn check_points(
    data: &ChartData,
    arity: usize,
    require_radius: bool,
    result: &mut ValidationResult,
) {
    let mut reported = 0usize;
    let mut suppressed = 0usize;
    for dataset in &data.datasets {
        for (index, value) in dataset.data.iter().enumerate() {
            let Some(problem) = point_problem(value, arity, require_radius) else {
                continue;
            };
            if reported < MAX_REPORTED_POINT_ERRORS {
                reported += 1;
                result.error(format!(
                    "dataset '{}' point {index} {problem}",
                    dataset.label
                ));
            } else {
                suppressed += 1;
            }
        }
    }
    if suppressed > 0 {
        result.error(format!("{suppressed} more malformed points not listed"));
    }
}

fn point_problem(value: &DataValue, arity: usize, require_radius: bool) -> Option<String> {
    match value {
        DataValue::Tuple(values) if values.len() < arity => Some(format!(
            "needs at least {arity} values, found {}",
            values.len()
        )),
        DataValue::Point(point) => point
            .first_missing(require_radius)
            .map(|key| format!("is missing `{key}`")),
        _ => None,
    }
}

fn check_quality(data: &ChartData, result: &mut ValidationResult) {
    for dataset in &data.datasets {
        if dataset.data.is_empty() {
            result.warn(format!("dataset '{}' is empty", dataset.label));
            continue;
        }
        let percent = missing_percent(dataset);
        if percent > MISSING_VALUE_WARN_PERCENT {
            result.warn(format!(
                "dataset '{}' has {percent:.0}% missing values",
                dataset.label
            ));
            result.suggest(format!(
                "Clean the data or interpolate the missing values in '{}'",
                dataset.label
            ));
        }
    }
}

fn missing_percent(dataset: &Dataset) -> f64 {
    let missing = dataset.data.iter().filter(|value| value.is_missing()).count();
    missing as f64 * 100.0 / dataset.data.len() as f64
}
