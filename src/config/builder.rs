use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::cache::{ConfigMemo, fingerprint};
use crate::core::{
    ChartData, ChartFamily, ChartKind, ColorFill, Dataset, DatasetColors, LINE_FILL_ALPHA,
    Viewport, with_alpha,
};
use crate::error::{ChartError, ChartResult};

use super::options::{SurfaceFlags, default_options, merge_shallow};
use super::{AnimationSetting, Theme};

/// Final, renderer-agnostic chart configuration.
///
/// Immutable once built; any change goes through a new
/// [`ChartConfigBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    kind: ChartKind,
    data: ChartData,
    options: Map<String, Value>,
    theme: Theme,
    animation: AnimationSetting,
    responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<Viewport>,
    interactive: bool,
}

impl ChartConfig {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn animation(&self) -> AnimationSetting {
        self.animation
    }

    #[must_use]
    pub fn responsive(&self) -> bool {
        self.responsive
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<Viewport> {
        self.dimensions
    }

    #[must_use]
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

/// Fluent accumulator for [`ChartConfig`].
///
/// `build` borrows the builder, so one builder can be reconfigured and built
/// again. Option overrides merge by shallow overwrite: repeated
/// [`with_options`](Self::with_options) calls accumulate top-level keys
/// rather than replacing the whole override map.
#[derive(Debug, Clone)]
pub struct ChartConfigBuilder {
    kind: Option<ChartKind>,
    data: Option<ChartData>,
    theme: Theme,
    animation: AnimationSetting,
    responsive: bool,
    dimensions: Option<Viewport>,
    interactive: bool,
    overrides: Map<String, Value>,
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self {
            kind: None,
            data: None,
            theme: Theme::default(),
            animation: AnimationSetting::default(),
            responsive: true,
            dimensions: None,
            interactive: true,
            overrides: Map::new(),
        }
    }
}

#[derive(Serialize)]
struct MemoKey<'a> {
    kind: ChartKind,
    data: &'a ChartData,
    options: &'a Map<String, Value>,
    responsive: bool,
    dimensions: Option<Viewport>,
    interactive: bool,
    theme: &'a Theme,
    animation: AnimationSetting,
}

impl ChartConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: ChartData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationSetting) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn without_animation(self) -> Self {
        self.with_animation(AnimationSetting::Off)
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Fixes the render surface size; a fixed size turns `responsive` off.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Viewport::new(width, height));
        self.responsive = false;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Merges `overrides` into the accumulated overrides, key by key.
    #[must_use]
    pub fn with_options(mut self, overrides: Map<String, Value>) -> Self {
        merge_shallow(&mut self.overrides, &overrides);
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }

    pub fn build(&self) -> ChartResult<ChartConfig> {
        let kind = self
            .kind
            .ok_or(ChartError::MissingConfigField { field: "type" })?;
        let data = self
            .data
            .as_ref()
            .ok_or(ChartError::MissingConfigField { field: "data" })?;
        if let Some(viewport) = self.dimensions {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }

        let mut options = default_options(
            kind,
            &self.theme,
            SurfaceFlags {
                responsive: self.responsive,
                dimensions: self.dimensions,
                interactive: self.interactive,
            },
        );
        merge_shallow(&mut options, &self.overrides);

        trace!(
            chart_kind = %kind,
            theme = %self.theme.name,
            datasets = data.datasets.len(),
            "built chart config"
        );
        Ok(ChartConfig {
            kind,
            data: themed_data(data, kind, &self.theme),
            options,
            theme: self.theme.clone(),
            animation: self.animation,
            responsive: self.responsive,
            dimensions: self.dimensions,
            interactive: self.interactive,
        })
    }

    /// Builds through `memo`, keyed by type, data, options, theme and
    /// animation. A key that cannot be computed means an uncached build.
    pub fn build_memoized(&self, memo: &ConfigMemo) -> ChartResult<ChartConfig> {
        let key = match self.memo_key() {
            Ok(key) => key,
            Err(err) => {
                debug!(error = %err, "config memo key unavailable; building uncached");
                return self.build();
            }
        };
        if let Some(config) = memo.get(&key) {
            trace!("config memo hit");
            return Ok(config);
        }
        let config = self.build()?;
        memo.insert(key, config.clone());
        Ok(config)
    }

    fn memo_key(&self) -> ChartResult<String> {
        let kind = self
            .kind
            .ok_or(ChartError::MissingConfigField { field: "type" })?;
        let data = self
            .data
            .as_ref()
            .ok_or(ChartError::MissingConfigField { field: "data" })?;
        fingerprint(&MemoKey {
            kind,
            data,
            options: &self.overrides,
            responsive: self.responsive,
            dimensions: self.dimensions,
            interactive: self.interactive,
            theme: &self.theme,
            animation: self.animation,
        })
    }
}

fn themed_data(data: &ChartData, kind: ChartKind, theme: &Theme) -> ChartData {
    ChartData {
        labels: data.labels.clone(),
        datasets: data
            .datasets
            .iter()
            .enumerate()
            .map(|(index, dataset)| Dataset {
                label: dataset.label.clone(),
                data: dataset.data.clone(),
                colors: themed_colors(index, kind, theme),
            })
            .collect(),
    }
}

/// Line family: tinted fill under a solid stroke. Slice family: one palette
/// color per slice. Everything else: solid fill and stroke.
fn themed_colors(index: usize, kind: ChartKind, theme: &Theme) -> DatasetColors {
    let color = theme.color_at(index);
    match kind.family() {
        ChartFamily::Line => DatasetColors {
            background_color: ColorFill::Single(with_alpha(color, LINE_FILL_ALPHA)),
            border_color: Some(color.to_owned()),
        },
        ChartFamily::Slice => DatasetColors {
            background_color: ColorFill::PerPoint(theme.resolved_palette()),
            border_color: Some(theme.background_color.clone()),
        },
        ChartFamily::Bar | ChartFamily::Point => DatasetColors {
            background_color: ColorFill::Single(color.to_owned()),
            border_color: Some(color.to_owned()),
        },
    }
}
