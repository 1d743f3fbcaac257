//! chart-pipeline: data ingestion and chart configuration pipeline.
//!
//! Raw user input (CSV-like text, JSON fragments, free text) is parsed,
//! normalized into one canonical chart data model, validated per chart type,
//! downsampled when oversized and finally turned into a renderer-agnostic
//! chart configuration. Caches and in-flight deduplication are explicit
//! objects owned by whoever constructs them.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod remote;
pub mod render;
pub mod telemetry;
pub mod validation;

pub use config::{ChartConfig, ChartConfigBuilder};
pub use error::{ChartError, ChartResult};
pub use pipeline::{ChartPipeline, PipelineConfig, PipelineOutcome};
