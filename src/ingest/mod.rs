//! Format detection and heuristic parsing of raw user text.
//!
//! Readers are tried in a fixed order: CSV, JSON array, free text. The first
//! reader that both claims the input and yields entries wins. When nothing
//! can be read, a canned example series for the requested chart kind is
//! returned and flagged through [`ParseOutcome::used_example_data`], so
//! downstream stages always receive data and callers can still tell a
//! substitution happened.

mod csv_text;
mod free_text;
mod json_text;
mod number;
mod sample_data;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{ChartKind, ParsedEntry};

pub use free_text::{
    DEFAULT_STRATEGIES, ExtractFn, FreeTextPattern, FreeTextStrategy, extract_assignment,
    extract_labeled, extract_space_separated, parse_free_text, parse_free_text_with,
};
pub use sample_data::{example_entries, example_series_name};

/// Where a [`ParseOutcome`]'s entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputFormat {
    Csv,
    Json,
    FreeText(FreeTextPattern),
    /// Entries returned by the remote parse service.
    Remote,
    /// Nothing was readable; entries are the canned example series.
    Example,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub entries: Vec<ParsedEntry>,
    pub format: InputFormat,
    /// Series name found in the input (a CSV header), used as dataset label.
    pub series_label: Option<String>,
    pub used_example_data: bool,
}

impl ParseOutcome {
    #[must_use]
    pub fn new(entries: Vec<ParsedEntry>, format: InputFormat) -> Self {
        Self {
            entries,
            format,
            series_label: None,
            used_example_data: false,
        }
    }

    #[must_use]
    pub fn with_series_label(mut self, series_label: Option<String>) -> Self {
        self.series_label = series_label;
        self
    }

    /// Canned example series for `kind`.
    #[must_use]
    pub fn example(kind: ChartKind) -> Self {
        Self {
            entries: example_entries(kind),
            format: InputFormat::Example,
            series_label: Some(example_series_name(kind).to_owned()),
            used_example_data: true,
        }
    }
}

/// Parses raw text, resolving the chart kind from a loose hint.
///
/// Never fails: unreadable input degrades to the example series.
#[must_use]
pub fn parse(raw_text: &str, chart_type_hint: &str) -> ParseOutcome {
    parse_for_kind(raw_text, ChartKind::from_hint(chart_type_hint))
}

#[must_use]
pub fn parse_for_kind(raw_text: &str, kind: ChartKind) -> ParseOutcome {
    let text = raw_text.trim();
    match read_entries(text) {
        Some(outcome) => {
            debug!(
                format = ?outcome.format,
                entries = outcome.entries.len(),
                "parsed raw input"
            );
            outcome
        }
        None => {
            warn!(
                chart_kind = %kind,
                input_len = text.len(),
                "no entries found in input; using example data"
            );
            ParseOutcome::example(kind)
        }
    }
}

fn read_entries(text: &str) -> Option<ParseOutcome> {
    if text.is_empty() {
        return None;
    }

    if csv_text::looks_like_csv(text) {
        let extract = csv_text::parse_csv(text);
        if !extract.entries.is_empty() {
            return Some(
                ParseOutcome::new(extract.entries, InputFormat::Csv)
                    .with_series_label(extract.series_label),
            );
        }
    }

    if let Some(entries) = json_text::parse_json_array(text) {
        if !entries.is_empty() {
            return Some(ParseOutcome::new(entries, InputFormat::Json));
        }
    }

    parse_free_text(text)
        .map(|(pattern, entries)| ParseOutcome::new(entries, InputFormat::FreeText(pattern)))
}
