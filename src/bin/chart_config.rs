use std::fs;
use std::io::Read;
use std::path::PathBuf;

use chart_pipeline::core::ChartKind;
use chart_pipeline::telemetry::init_tracing;
use chart_pipeline::{ChartPipeline, PipelineConfig, PipelineOutcome};
use serde_json::Value;

const USAGE: &str =
    "usage: chart_config <chart-type> [--input <path>] [--config <path>] [--json]";

#[derive(Debug)]
struct CliArgs {
    chart_type: String,
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    json_document: bool,
}

fn main() {
    let _ = init_tracing("chart_pipeline=warn");
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the input was rejected by validation.
fn run() -> Result<bool, String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_str(&read_file(path)?).map_err(|e| e.to_string())?,
        None => PipelineConfig::default(),
    };
    let pipeline = ChartPipeline::new(config).map_err(|e| e.to_string())?;

    let raw = match &args.input {
        Some(path) => read_file(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buffer
        }
    };

    let outcome = if args.json_document {
        let kind = args
            .chart_type
            .parse::<ChartKind>()
            .map_err(|e| e.to_string())?;
        let value: Value =
            serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
        pipeline.prepare_value(&value, kind)
    } else {
        pipeline.prepare_text(&raw, &args.chart_type)
    }
    .map_err(|e| e.to_string())?;

    match outcome {
        PipelineOutcome::Ready(prepared) => {
            if prepared.used_example_data {
                eprintln!("note: no data found in input; showing example data");
            }
            for warning in &prepared.validation.warnings {
                eprintln!("warning: {warning}");
            }
            println!("{}", prepared.config.to_json_pretty().map_err(|e| e.to_string())?);
            Ok(true)
        }
        PipelineOutcome::Rejected { validation, .. } => {
            let rendered = serde_json::to_string_pretty(&validation)
                .map_err(|err| format!("failed to serialize validation: {err}"))?;
            println!("{rendered}");
            Ok(false)
        }
    }
}

fn read_file(path: &PathBuf) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let chart_type = match args.next() {
        Some(flag) if flag == "--help" || flag == "-h" => return Err(USAGE.to_owned()),
        Some(chart_type) => chart_type,
        None => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut json_document = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--json" => json_document = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        chart_type,
        input,
        config,
        json_document,
    })
}
