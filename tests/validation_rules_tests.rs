use chart_pipeline::core::{
    ChartData, ChartKind, DataValue, Dataset, PointRecord, default_dataset_colors,
};
use chart_pipeline::validation::{MAX_REPORTED_POINT_ERRORS, validate};

fn dataset(index: usize, data: Vec<DataValue>) -> Dataset {
    Dataset {
        label: format!("Series {}", index + 1),
        data,
        colors: default_dataset_colors(index),
    }
}

fn categories(count: usize) -> ChartData {
    ChartData {
        labels: (0..count).map(|i| format!("C{i}")).collect(),
        datasets: vec![dataset(0, (0..count).map(|i| DataValue::from(i as f64)).collect())],
    }
}

#[test]
fn scatter_point_with_one_coordinate_is_invalid() {
    let data = ChartData {
        labels: Vec::new(),
        datasets: vec![dataset(
            0,
            vec![DataValue::Tuple(vec![1.0, 2.0]), DataValue::Tuple(vec![3.0])],
        )],
    };

    let result = validate(&data, ChartKind::Scatter);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("point 1"));
}

#[test]
fn bubble_points_require_radius() {
    let data = ChartData {
        labels: Vec::new(),
        datasets: vec![dataset(
            0,
            vec![
                DataValue::Point(PointRecord::xyr(1.0, 2.0, 3.0)),
                DataValue::Point(PointRecord::xy(1.0, 2.0)),
            ],
        )],
    };

    let bubble = validate(&data, ChartKind::Bubble);
    assert!(!bubble.is_valid);
    assert!(bubble.errors[0].contains("`r`"));

    assert!(validate(&data, ChartKind::Scatter).is_valid);
}

#[test]
fn point_errors_are_capped_with_a_summary() {
    let data = ChartData {
        labels: Vec::new(),
        datasets: vec![dataset(0, vec![DataValue::Tuple(Vec::new()); 15])],
    };

    let result = validate(&data, ChartKind::Scatter);
    assert_eq!(result.errors.len(), MAX_REPORTED_POINT_ERRORS + 1);
    assert!(result.errors.last().expect("summary").contains("5 more"));
}

#[test]
fn pie_with_eleven_categories_is_valid_with_warnings() {
    let result = validate(&categories(11), ChartKind::Pie);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(!result.suggestions.is_empty());
}

#[test]
fn pie_with_ten_categories_has_no_warning() {
    assert!(validate(&categories(10), ChartKind::Pie).warnings.is_empty());
}

#[test]
fn polar_area_shares_the_category_limit() {
    assert_eq!(validate(&categories(12), ChartKind::PolarArea).warnings.len(), 1);
}

#[test]
fn doughnut_with_several_datasets_warns() {
    let mut data = categories(3);
    data.datasets.push(dataset(1, vec![DataValue::from(1.0); 3]));

    let result = validate(&data, ChartKind::Doughnut);
    assert!(result.is_valid);
    assert!(result.warnings.iter().any(|w| w.contains("single dataset")));
}

#[test]
fn line_without_datasets_is_invalid() {
    let data = ChartData {
        labels: vec!["a".to_owned(), "b".to_owned()],
        datasets: Vec::new(),
    };

    let result = validate(&data, ChartKind::Line);
    assert!(!result.is_valid);
    assert!(validate(&data, ChartKind::Bar).is_valid);
}

#[test]
fn short_line_and_radar_only_warn() {
    let line = validate(&categories(1), ChartKind::Area);
    assert!(line.is_valid);
    assert_eq!(line.warnings.len(), 1);

    let radar = validate(&categories(2), ChartKind::Radar);
    assert!(radar.is_valid);
    assert_eq!(radar.warnings.len(), 1);
}

#[test]
fn mostly_missing_dataset_warns_and_suggests_cleanup() {
    let data = ChartData {
        labels: (0..4).map(|i| i.to_string()).collect(),
        datasets: vec![dataset(
            0,
            vec![
                DataValue::from(1.0),
                DataValue::Null,
                DataValue::Text(" ".to_owned()),
                DataValue::from(4.0),
            ],
        )],
    };

    let result = validate(&data, ChartKind::Bar);
    assert!(result.is_valid);
    assert!(result.warnings[0].contains("50%"));
    assert_eq!(result.suggestions.len(), 1);
}

#[test]
fn exactly_twenty_percent_missing_is_tolerated() {
    let mut values = vec![DataValue::from(1.0); 4];
    values.push(DataValue::Null);
    let data = ChartData {
        labels: (0..5).map(|i| i.to_string()).collect(),
        datasets: vec![dataset(0, values)],
    };

    assert!(validate(&data, ChartKind::Bar).warnings.is_empty());
}

#[test]
fn empty_dataset_and_length_mismatch_are_warnings() {
    let data = ChartData {
        labels: vec!["a".to_owned(), "b".to_owned()],
        datasets: vec![dataset(0, Vec::new()), dataset(1, vec![DataValue::from(1.0)])],
    };

    let result = validate(&data, ChartKind::Bar);
    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn validation_result_serializes_in_camel_case() {
    let value = serde_json::to_value(validate(&categories(2), ChartKind::Bar)).expect("serialize");
    assert_eq!(value["isValid"], serde_json::json!(true));
}
