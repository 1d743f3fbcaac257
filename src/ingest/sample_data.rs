use crate::core::{ChartKind, ParsedEntry};

/// Canned series handed back when nothing could be read from the input.
struct ExampleSeries {
    name: &'static str,
    points: &'static [(&'static str, f64)],
}

const BAR: ExampleSeries = ExampleSeries {
    name: "Monthly Sales",
    points: &[
        ("Jan", 12_000.0),
        ("Feb", 19_000.0),
        ("Mar", 15_000.0),
        ("Apr", 25_000.0),
        ("May", 22_000.0),
        ("Jun", 30_000.0),
    ],
};

const LINE: ExampleSeries = ExampleSeries {
    name: "Weekly Visitors",
    points: &[
        ("Week 1", 1_200.0),
        ("Week 2", 1_900.0),
        ("Week 3", 1_700.0),
        ("Week 4", 2_400.0),
        ("Week 5", 2_100.0),
        ("Week 6", 2_800.0),
    ],
};

const AREA: ExampleSeries = ExampleSeries {
    name: "Quarterly Revenue",
    points: &[
        ("Q1", 48_000.0),
        ("Q2", 52_000.0),
        ("Q3", 61_000.0),
        ("Q4", 70_000.0),
    ],
};

const SHARE: ExampleSeries = ExampleSeries {
    name: "Traffic Share",
    points: &[("Desktop", 55.0), ("Mobile", 35.0), ("Tablet", 10.0)],
};

const BUDGET: ExampleSeries = ExampleSeries {
    name: "Budget Split",
    points: &[
        ("Engineering", 40.0),
        ("Marketing", 25.0),
        ("Operations", 20.0),
        ("Support", 15.0),
    ],
};

const REGIONS: ExampleSeries = ExampleSeries {
    name: "Regional Orders",
    points: &[
        ("North", 11.0),
        ("South", 16.0),
        ("East", 7.0),
        ("West", 14.0),
        ("Central", 9.0),
    ],
};

const RADAR: ExampleSeries = ExampleSeries {
    name: "Product Scores",
    points: &[
        ("Speed", 8.0),
        ("Reliability", 9.0),
        ("Comfort", 6.0),
        ("Safety", 9.5),
        ("Efficiency", 7.0),
    ],
};

const SCATTER: ExampleSeries = ExampleSeries {
    name: "Height vs Weight",
    points: &[
        ("150", 52.0),
        ("160", 58.0),
        ("170", 66.0),
        ("180", 74.0),
        ("190", 85.0),
    ],
};

const BUBBLE: ExampleSeries = ExampleSeries {
    name: "Market Size",
    points: &[("Alpha", 20.0), ("Beta", 35.0), ("Gamma", 12.0), ("Delta", 28.0)],
};

fn series_for(kind: ChartKind) -> &'static ExampleSeries {
    match kind {
        ChartKind::Bar => &BAR,
        ChartKind::Line => &LINE,
        ChartKind::Area => &AREA,
        ChartKind::Pie => &SHARE,
        ChartKind::Doughnut => &BUDGET,
        ChartKind::PolarArea => &REGIONS,
        ChartKind::Radar => &RADAR,
        ChartKind::Scatter => &SCATTER,
        ChartKind::Bubble => &BUBBLE,
    }
}

/// Example entries for `kind`; never empty.
#[must_use]
pub fn example_entries(kind: ChartKind) -> Vec<ParsedEntry> {
    series_for(kind)
        .points
        .iter()
        .filter_map(|(label, value)| ParsedEntry::new(*label, *value))
        .collect()
}

/// Series name carried by the example for `kind`.
#[must_use]
pub fn example_series_name(kind: ChartKind) -> &'static str {
    series_for(kind).name
}
