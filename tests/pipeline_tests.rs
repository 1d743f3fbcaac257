use std::sync::Arc;

use async_trait::async_trait;
use chart_pipeline::config::{AnimationSetting, Theme};
use chart_pipeline::core::{ChartKind, ColorFill, DEFAULT_PALETTE, DataValue};
use chart_pipeline::ingest::{InputFormat, example_entries};
use chart_pipeline::remote::{ParseService, RemoteParseResponse};
use chart_pipeline::render::{ChartRenderer, NullRenderer};
use chart_pipeline::{ChartError, ChartPipeline, ChartResult, PipelineConfig, PipelineOutcome};
use serde_json::json;

fn pipeline() -> ChartPipeline {
    ChartPipeline::new(PipelineConfig::default()).expect("default pipeline")
}

#[test]
fn csv_scenario_produces_ready_bar_config() {
    let outcome = pipeline()
        .prepare_text("Month,Sales\nJan,12000\nFeb,15500\nMar,nope", "bar")
        .expect("prepare");

    let PipelineOutcome::Ready(prepared) = outcome else {
        panic!("expected a ready chart");
    };
    let config = &prepared.config;
    assert_eq!(config.kind(), ChartKind::Bar);
    assert_eq!(config.data().labels, ["Jan", "Feb"]);

    let dataset = &config.data().datasets[0];
    assert_eq!(dataset.label, "Sales");
    assert_eq!(dataset.data, [DataValue::from(12_000.0), DataValue::from(15_500.0)]);
    assert_eq!(
        dataset.colors.background_color,
        ColorFill::Single(DEFAULT_PALETTE[0].to_owned())
    );
    assert!(prepared.validation.warnings.is_empty());
    assert_eq!(prepared.format, InputFormat::Csv);
    assert!(!prepared.used_example_data);
    assert!(!prepared.downsampled);
}

#[test]
fn empty_input_still_renders_flagged_example() {
    let outcome = pipeline().prepare_text("", "pie").expect("prepare");

    assert!(outcome.is_ready());
    assert!(outcome.used_example_data());
    let config = outcome.config().expect("config");
    assert_eq!(config.kind(), ChartKind::Pie);
    assert_eq!(config.data().labels, ["Desktop", "Mobile", "Tablet"]);
}

#[test]
fn structurally_invalid_data_is_rejected_without_config() {
    let outcome = pipeline()
        .prepare_value(&json!([{"x": 1, "y": 2}, {"x": 3}]), ChartKind::Scatter)
        .expect("prepare");

    assert!(!outcome.is_ready());
    assert!(outcome.config().is_none());
    assert_eq!(outcome.validation().errors.len(), 1);
}

#[test]
fn value_documents_with_extra_values_are_cut_to_their_labels() {
    let outcome = pipeline()
        .prepare_value(&json!({"values": [1, 2, 3], "labels": ["a"]}), ChartKind::Bar)
        .expect("prepare");

    let config = outcome.config().expect("config");
    assert_eq!(config.data().labels, ["a"]);
    assert_eq!(config.data().datasets[0].data, [DataValue::from(1.0)]);
    assert!(outcome.validation().warnings.is_empty());

    let mut renderer = NullRenderer::default();
    renderer.render(config).expect("aligned data renders");
}

#[test]
fn short_datasets_are_padded_and_stay_aligned_through_downsampling() {
    let labels: Vec<String> = (0..10).map(|i| format!("L{i}")).collect();
    let pipeline =
        ChartPipeline::new(PipelineConfig::default().with_max_points(3)).expect("pipeline");

    let outcome = pipeline
        .prepare_value(
            &json!({"labels": labels, "datasets": [{"label": "s", "data": [1, 2, 3, 4, 5, 6]}]}),
            ChartKind::Line,
        )
        .expect("prepare");

    let PipelineOutcome::Ready(prepared) = outcome else {
        panic!("expected a ready chart");
    };
    assert!(prepared.downsampled);
    let data = prepared.config.data();
    assert_eq!(data.labels, ["L0", "L4", "L8"]);
    assert_eq!(
        data.datasets[0].data,
        [DataValue::from(1.0), DataValue::from(5.0), DataValue::Null]
    );

    let mut renderer = NullRenderer::default();
    renderer.render(&prepared.config).expect("aligned data renders");
}

#[test]
fn unreadable_documents_fall_back_to_flagged_example() {
    let pipeline = pipeline();
    let example_labels: Vec<String> = example_entries(ChartKind::Bar)
        .into_iter()
        .map(|entry| entry.label)
        .collect();

    for document in [json!("hello"), json!([]), json!({})] {
        let outcome = pipeline
            .prepare_value(&document, ChartKind::Bar)
            .expect("prepare");

        let PipelineOutcome::Ready(prepared) = outcome else {
            panic!("expected the example chart for {document}");
        };
        assert!(prepared.used_example_data);
        assert_eq!(prepared.format, InputFormat::Example);
        assert_eq!(prepared.config.data().labels, example_labels);
    }
}

#[test]
fn oversized_input_is_downsampled_before_build() {
    let values: Vec<i64> = (0..50).collect();
    let pipeline =
        ChartPipeline::new(PipelineConfig::default().with_max_points(10)).expect("pipeline");

    let outcome = pipeline
        .prepare_value(&json!(values), ChartKind::Line)
        .expect("prepare");

    let PipelineOutcome::Ready(prepared) = outcome else {
        panic!("expected a ready chart");
    };
    assert!(prepared.downsampled);
    assert_eq!(prepared.config.data().labels.len(), 10);
    assert_eq!(prepared.config.data().datasets[0].data.len(), 10);
}

#[test]
fn repeated_preparation_hits_config_memo() {
    let pipeline = pipeline();
    let first = pipeline.prepare_text("a,1\nb,2", "line").expect("prepare");
    let second = pipeline.prepare_text("a,1\nb,2", "line").expect("prepare");

    assert_eq!(first, second);
    assert_eq!(pipeline.config_memo_stats().hits, 1);
}

#[test]
fn pipeline_config_applies_theme_animation_and_overrides() {
    let config = PipelineConfig::default()
        .with_theme("dark")
        .with_animation(AnimationSetting::Off)
        .with_option("indexAxis", json!("y"))
        .with_dimensions(640, 480);
    let pipeline = ChartPipeline::new(config).expect("pipeline");

    let outcome = pipeline.prepare_text("a,1\nb,2", "bar").expect("prepare");
    let built = outcome.config().expect("config");

    assert_eq!(built.theme(), &Theme::by_name("dark").expect("theme"));
    assert_eq!(built.animation(), AnimationSetting::Off);
    assert_eq!(built.options()["indexAxis"], json!("y"));
    assert!(!built.responsive());
}

#[test]
fn pipeline_config_defaults_and_json_loading() {
    let defaults = PipelineConfig::default();
    assert_eq!(defaults.max_points, 1000);
    assert_eq!(defaults.theme, "default");
    assert_eq!(defaults.prompt_cache_capacity, 100);
    assert_eq!(defaults.response_ttl_secs, 300);
    assert_eq!(defaults.request_timeout_secs, 30);

    let loaded = PipelineConfig::from_json_str(r#"{"max_points": 50, "animation": "off"}"#)
        .expect("load");
    assert_eq!(loaded.max_points, 50);
    assert_eq!(loaded.animation, AnimationSetting::Off);
    assert_eq!(loaded.theme, "default");

    let round_trip =
        PipelineConfig::from_json_str(&defaults.to_json_pretty().expect("json")).expect("load");
    assert_eq!(round_trip, defaults);
}

#[test]
fn invalid_pipeline_configs_are_rejected() {
    assert!(matches!(
        PipelineConfig::from_json_str(r#"{"max_points": 0}"#),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        PipelineConfig::from_json_str(r#"{"request_timeout_secs": 0}"#),
        Err(ChartError::InvalidData(_))
    ));
    assert!(ChartPipeline::new(PipelineConfig::default().with_theme("neon")).is_err());
    assert!(matches!(
        ChartPipeline::new(PipelineConfig::default().with_dimensions(0, 10)),
        Err(ChartError::InvalidViewport { .. })
    ));
    assert!(PipelineConfig::from_json_str("not json").is_err());
}

#[test]
fn prepared_configs_render_headlessly() {
    let mut renderer = NullRenderer::default();
    for kind in ChartKind::ALL {
        let outcome = pipeline().prepare_text("", kind.as_str()).expect("prepare");
        let config = outcome.config().expect("example data always renders");
        renderer.render(config).expect("render");
        assert_eq!(renderer.last_kind, Some(kind));
    }
    assert_eq!(renderer.render_count, ChartKind::ALL.len());
}

struct FixedService;

#[async_trait]
impl ParseService for FixedService {
    async fn parse(&self, _prompt: &str, kind: ChartKind) -> ChartResult<RemoteParseResponse> {
        Ok(serde_json::from_value(json!({
            "success": true,
            "data": [{"label": "North", "value": 3}, {"label": "South", "value": 4}],
            "chartType": kind.as_str(),
        }))
        .expect("valid response"))
    }
}

#[tokio::test]
async fn prompt_preparation_uses_remote_entries() {
    let config = PipelineConfig::default();
    let parser = config.prompt_parser(Arc::new(FixedService));
    let pipeline = ChartPipeline::new(config).expect("pipeline");

    let outcome = pipeline
        .prepare_prompt(&parser, "regional split", "doughnut")
        .await
        .expect("prepare");

    let PipelineOutcome::Ready(prepared) = outcome else {
        panic!("expected a ready chart");
    };
    assert_eq!(prepared.format, InputFormat::Remote);
    assert_eq!(prepared.config.kind(), ChartKind::Doughnut);
    assert_eq!(prepared.config.data().labels, ["North", "South"]);
}
