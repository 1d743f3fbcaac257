use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Chart types understood by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Area,
    Pie,
    Doughnut,
    PolarArea,
    Radar,
    Scatter,
    Bubble,
}

/// Groups of chart kinds that share coloring and option defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartFamily {
    Bar,
    Line,
    Slice,
    Point,
}

impl ChartKind {
    pub const ALL: [Self; 9] = [
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Doughnut,
        Self::PolarArea,
        Self::Radar,
        Self::Scatter,
        Self::Bubble,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::PolarArea => "polarArea",
            Self::Radar => "radar",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
        }
    }

    #[must_use]
    pub const fn family(self) -> ChartFamily {
        match self {
            Self::Line | Self::Area | Self::Radar => ChartFamily::Line,
            Self::Pie | Self::Doughnut | Self::PolarArea => ChartFamily::Slice,
            Self::Scatter | Self::Bubble => ChartFamily::Point,
            Self::Bar => ChartFamily::Bar,
        }
    }

    /// Point-based kinds ignore `labels` and carry `{x, y[, r]}` records.
    #[must_use]
    pub const fn is_point_based(self) -> bool {
        matches!(self.family(), ChartFamily::Point)
    }

    /// Resolves a loose caller hint, falling back to `bar` for anything
    /// unrecognized.
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        hint.parse().unwrap_or(Self::Bar)
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "bar" | "column" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "area" => Ok(Self::Area),
            "pie" => Ok(Self::Pie),
            "doughnut" | "donut" => Ok(Self::Doughnut),
            "polararea" | "polar" => Ok(Self::PolarArea),
            "radar" => Ok(Self::Radar),
            "scatter" => Ok(Self::Scatter),
            "bubble" => Ok(Self::Bubble),
            _ => Err(ChartError::UnknownChartKind(value.to_owned())),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
