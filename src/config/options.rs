use serde_json::{Map, Value, json};

use crate::core::{ChartFamily, ChartKind, Viewport};

use super::Theme;

/// Presentation flags mirrored into the option tree.
#[derive(Debug, Clone, Copy)]
pub(super) struct SurfaceFlags {
    pub(super) responsive: bool,
    pub(super) dimensions: Option<Viewport>,
    pub(super) interactive: bool,
}

/// Chart-type defaults before caller overrides are merged in.
pub(super) fn default_options(
    kind: ChartKind,
    theme: &Theme,
    flags: SurfaceFlags,
) -> Map<String, Value> {
    let legend_position = match kind.family() {
        ChartFamily::Slice => "right",
        _ => "top",
    };

    let mut options = Map::new();
    options.insert("responsive".to_owned(), Value::Bool(flags.responsive));
    options.insert(
        "maintainAspectRatio".to_owned(),
        Value::Bool(flags.dimensions.is_none()),
    );
    options.insert(
        "plugins".to_owned(),
        json!({
            "legend": {
                "display": true,
                "position": legend_position,
                "labels": { "color": theme.text_color },
            },
            "tooltip": { "enabled": flags.interactive },
        }),
    );
    if flags.interactive {
        options.insert(
            "interaction".to_owned(),
            json!({ "mode": interaction_mode(kind), "intersect": false }),
        );
    } else {
        options.insert("events".to_owned(), Value::Array(Vec::new()));
    }

    match kind {
        ChartKind::Bar | ChartKind::Line | ChartKind::Area => {
            options.insert("scales".to_owned(), cartesian_scales(theme, false));
        }
        ChartKind::Scatter | ChartKind::Bubble => {
            options.insert("scales".to_owned(), cartesian_scales(theme, true));
        }
        ChartKind::Radar | ChartKind::PolarArea => {
            options.insert(
                "scales".to_owned(),
                json!({
                    "r": {
                        "beginAtZero": true,
                        "grid": { "color": theme.grid_color },
                        "pointLabels": { "color": theme.text_color },
                    }
                }),
            );
        }
        ChartKind::Pie | ChartKind::Doughnut => {}
    }

    match kind {
        ChartKind::Line => {
            options.insert(
                "elements".to_owned(),
                json!({ "line": { "tension": 0.3, "fill": false } }),
            );
        }
        ChartKind::Area => {
            options.insert(
                "elements".to_owned(),
                json!({ "line": { "tension": 0.3, "fill": true } }),
            );
        }
        ChartKind::Doughnut => {
            options.insert("cutout".to_owned(), json!("50%"));
        }
        _ => {}
    }

    options
}

/// Shallow merge: top-level keys of `overrides` replace those in `target`.
pub(super) fn merge_shallow(target: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        target.insert(key.clone(), value.clone());
    }
}

fn interaction_mode(kind: ChartKind) -> &'static str {
    match kind.family() {
        ChartFamily::Point | ChartFamily::Slice => "nearest",
        ChartFamily::Bar | ChartFamily::Line => "index",
    }
}

fn cartesian_scales(theme: &Theme, linear_x: bool) -> Value {
    let axis = |begin_at_zero: bool| {
        json!({
            "beginAtZero": begin_at_zero,
            "grid": { "color": theme.grid_color },
            "ticks": { "color": theme.text_color },
        })
    };

    let mut x = axis(false);
    let mut y = axis(true);
    if linear_x {
        x["type"] = json!("linear");
        x["position"] = json!("bottom");
        y["type"] = json!("linear");
        y["beginAtZero"] = json!(false);
    }
    json!({ "x": x, "y": y })
}
