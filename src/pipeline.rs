//! End-to-end facade: raw input to a validated, renderable chart config.
//!
//! `parse → normalize → validate → aggregate → build` runs synchronously;
//! only [`ChartPipeline::prepare_prompt`] suspends, and only while the
//! remote parse service is consulted.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::aggregate::aggregate;
use crate::cache::{CacheStats, ConfigMemo};
use crate::config::{AnimationSetting, ChartConfig, ChartConfigBuilder, Theme};
use crate::core::{ChartData, ChartKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::ingest::{self, InputFormat, ParseOutcome};
use crate::normalize::{RawShape, normalize, normalize_json};
use crate::remote::{HttpTransport, ParseService, PromptParser, RequestClient};
use crate::validation::{ValidationResult, validate};

/// Pipeline bootstrap configuration.
///
/// Serializable so hosts can keep pipeline setup in a JSON file; every field
/// has a default, so `{}` is a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub animation: AnimationSetting,
    #[serde(default = "default_true")]
    pub responsive: bool,
    #[serde(default = "default_true")]
    pub interactive: bool,
    #[serde(default)]
    pub dimensions: Option<Viewport>,
    /// Top-level option overrides merged over the chart-type defaults.
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default = "default_prompt_cache_capacity")]
    pub prompt_cache_capacity: usize,
    #[serde(default = "default_response_ttl_secs")]
    pub response_ttl_secs: u64,
    #[serde(default = "default_config_memo_capacity")]
    pub config_memo_capacity: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
            theme: default_theme(),
            animation: AnimationSetting::default(),
            responsive: true,
            interactive: true,
            dimensions: None,
            options: Map::new(),
            prompt_cache_capacity: default_prompt_cache_capacity(),
            response_ttl_secs: default_response_ttl_secs(),
            config_memo_capacity: default_config_memo_capacity(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationSetting) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Viewport::new(width, height));
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_prompt_cache_capacity(mut self, capacity: usize) -> Self {
        self.prompt_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_response_ttl_secs(mut self, secs: u64) -> Self {
        self.response_ttl_secs = secs;
        self
    }

    #[must_use]
    pub fn with_config_memo_capacity(mut self, capacity: usize) -> Self {
        self.config_memo_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn response_ttl(&self) -> Duration {
        Duration::from_secs(self.response_ttl_secs)
    }

    /// Rejects settings no pipeline can run with. Zero cache capacities and a
    /// zero TTL are accepted and disable the corresponding cache.
    pub fn validate(&self) -> ChartResult<()> {
        if self.max_points == 0 {
            return Err(ChartError::InvalidData(
                "max_points must be greater than zero".to_owned(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ChartError::InvalidData(
                "request_timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if Theme::by_name(&self.theme).is_none() {
            return Err(ChartError::InvalidData(format!(
                "unknown theme `{}` (expected one of: {})",
                self.theme,
                Theme::builtin_names().join(", ")
            )));
        }
        if let Some(viewport) = self.dimensions {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates a config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Request client over `transport` using this config's timeout and TTL.
    #[must_use]
    pub fn request_client(&self, transport: Arc<dyn HttpTransport>) -> RequestClient {
        RequestClient::new(transport)
            .with_timeout(self.request_timeout())
            .with_response_ttl(self.response_ttl())
    }

    /// Prompt parser over `service` using this config's cache capacity.
    #[must_use]
    pub fn prompt_parser<S>(&self, service: Arc<S>) -> PromptParser<S>
    where
        S: ParseService + 'static,
    {
        PromptParser::with_capacity(service, self.prompt_cache_capacity)
    }
}

fn default_max_points() -> usize {
    1000
}

fn default_theme() -> String {
    "default".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_prompt_cache_capacity() -> usize {
    100
}

fn default_response_ttl_secs() -> u64 {
    300
}

fn default_config_memo_capacity() -> usize {
    64
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// A config ready to hand to a renderer, with the facts gathered on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    pub config: ChartConfig,
    pub validation: ValidationResult,
    pub format: InputFormat,
    pub used_example_data: bool,
    pub downsampled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Ready(PreparedChart),
    /// Structural validation failed; no config was built.
    Rejected {
        validation: ValidationResult,
        format: InputFormat,
        used_example_data: bool,
    },
}

impl PipelineOutcome {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn config(&self) -> Option<&ChartConfig> {
        match self {
            Self::Ready(prepared) => Some(&prepared.config),
            Self::Rejected { .. } => None,
        }
    }

    #[must_use]
    pub fn validation(&self) -> &ValidationResult {
        match self {
            Self::Ready(prepared) => &prepared.validation,
            Self::Rejected { validation, .. } => validation,
        }
    }

    #[must_use]
    pub fn used_example_data(&self) -> bool {
        match self {
            Self::Ready(prepared) => prepared.used_example_data,
            Self::Rejected {
                used_example_data, ..
            } => *used_example_data,
        }
    }
}

/// Stateless stages plus one owned config memo.
#[derive(Debug)]
pub struct ChartPipeline {
    config: PipelineConfig,
    theme: Theme,
    memo: ConfigMemo,
}

impl ChartPipeline {
    pub fn new(config: PipelineConfig) -> ChartResult<Self> {
        config.validate()?;
        let theme = Theme::by_name(&config.theme)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown theme `{}`", config.theme)))?;
        let memo = ConfigMemo::new(config.config_memo_capacity);
        Ok(Self {
            config,
            theme,
            memo,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn config_memo(&self) -> &ConfigMemo {
        &self.memo
    }

    #[must_use]
    pub fn config_memo_stats(&self) -> CacheStats {
        self.memo.stats()
    }

    /// Parses raw text locally, resolving the chart kind from `chart_type_hint`.
    pub fn prepare_text(
        &self,
        raw_text: &str,
        chart_type_hint: &str,
    ) -> ChartResult<PipelineOutcome> {
        let kind = ChartKind::from_hint(chart_type_hint);
        let outcome = ingest::parse_for_kind(raw_text, kind);
        self.prepare_parsed(&outcome, kind)
    }

    pub fn prepare_parsed(
        &self,
        outcome: &ParseOutcome,
        kind: ChartKind,
    ) -> ChartResult<PipelineOutcome> {
        let data = normalize(RawShape::Parsed(outcome), kind);
        self.finish(data, kind, outcome.format, outcome.used_example_data)
    }

    /// Runs an already-decoded JSON document through normalization onward.
    ///
    /// A document with no readable chart data degrades to the flagged
    /// example series, like unreadable text does.
    pub fn prepare_value(&self, value: &Value, kind: ChartKind) -> ChartResult<PipelineOutcome> {
        let data = normalize_json(value, kind);
        if data.is_empty() {
            warn!(chart_kind = %kind, "json document holds no chart data; using example data");
            return self.prepare_parsed(&ParseOutcome::example(kind), kind);
        }
        self.finish(data, kind, InputFormat::Json, false)
    }

    /// Asks `parser` (remote first, local fallback) and prepares the result.
    pub async fn prepare_prompt<S>(
        &self,
        parser: &PromptParser<S>,
        prompt: &str,
        chart_type_hint: &str,
    ) -> ChartResult<PipelineOutcome>
    where
        S: ParseService + 'static,
    {
        let kind = ChartKind::from_hint(chart_type_hint);
        let outcome = parser.parse_for_kind(prompt, kind).await;
        self.prepare_parsed(&outcome, kind)
    }

    fn finish(
        &self,
        data: ChartData,
        kind: ChartKind,
        format: InputFormat,
        used_example_data: bool,
    ) -> ChartResult<PipelineOutcome> {
        let validation = validate(&data, kind);
        if !validation.is_valid {
            warn!(
                chart_kind = %kind,
                errors = validation.errors.len(),
                "chart data rejected"
            );
            return Ok(PipelineOutcome::Rejected {
                validation,
                format,
                used_example_data,
            });
        }

        let reduced = match aggregate(&data, self.config.max_points) {
            Cow::Owned(reduced) => Some(reduced),
            Cow::Borrowed(_) => None,
        };
        let downsampled = reduced.is_some();
        let data = reduced.unwrap_or(data);
        let config = self.builder(kind).with_data(data).build_memoized(&self.memo)?;
        debug!(
            chart_kind = %kind,
            downsampled,
            used_example_data,
            "chart config prepared"
        );
        Ok(PipelineOutcome::Ready(PreparedChart {
            config,
            validation,
            format,
            used_example_data,
            downsampled,
        }))
    }

    fn builder(&self, kind: ChartKind) -> ChartConfigBuilder {
        let builder = ChartConfigBuilder::new()
            .with_kind(kind)
            .with_theme(self.theme.clone())
            .with_animation(self.config.animation)
            .with_responsive(self.config.responsive)
            .with_interactive(self.config.interactive)
            .with_options(self.config.options.clone());
        match self.config.dimensions {
            Some(viewport) => builder.with_dimensions(viewport.width, viewport.height),
            None => builder,
        }
    }
}
