use std::borrow::Cow;

use chart_pipeline::aggregate::aggregate;
use chart_pipeline::core::{ChartData, DataValue, Dataset, default_dataset_colors};

fn series(points: usize, datasets: usize) -> ChartData {
    ChartData {
        labels: (0..points).map(|i| format!("L{i}")).collect(),
        datasets: (0..datasets)
            .map(|d| Dataset {
                label: format!("D{d}"),
                data: (0..points).map(|i| DataValue::from(i as f64)).collect(),
                colors: default_dataset_colors(d),
            })
            .collect(),
    }
}

#[test]
fn data_within_budget_is_borrowed_unchanged() {
    let data = series(10, 2);
    let reduced = aggregate(&data, 20);
    assert!(matches!(reduced, Cow::Borrowed(_)));
    assert_eq!(*reduced, data);
}

#[test]
fn oversized_data_keeps_stride_multiples_in_every_dataset() {
    let data = series(10, 2);
    // 20 points, budget 5: stride 4 keeps indices 0, 4, 8.
    let reduced = aggregate(&data, 5);

    assert!(matches!(reduced, Cow::Owned(_)));
    assert_eq!(reduced.labels, ["L0", "L4", "L8"]);
    for dataset in &reduced.datasets {
        assert_eq!(
            dataset.data,
            [DataValue::from(0.0), DataValue::from(4.0), DataValue::from(8.0)]
        );
    }
}

#[test]
fn downsampling_is_deterministic() {
    let data = series(1_000, 3);
    assert_eq!(aggregate(&data, 100), aggregate(&data, 100));
}

#[test]
fn zero_budget_behaves_like_one() {
    let data = series(5, 1);
    let reduced = aggregate(&data, 0);
    assert_eq!(reduced.labels, ["L0"]);
    assert_eq!(reduced.datasets[0].data.len(), 1);
}

#[test]
fn dataset_labels_and_colors_survive() {
    let data = series(50, 2);
    let reduced = aggregate(&data, 10);
    assert_eq!(reduced.datasets[1].label, "D1");
    assert_eq!(reduced.datasets[1].colors, default_dataset_colors(1));
}
