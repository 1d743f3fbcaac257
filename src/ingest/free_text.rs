use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::core::ParsedEntry;

/// Tag identifying which free-text strategy produced a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeTextPattern {
    /// `Revenue: $12K`, `Cost - 40`, `Budget $3M`.
    Labeled,
    /// `Apples 30 Oranges 20`.
    SpaceSeparated,
    /// `north = 12`.
    Assignment,
    /// Caller-supplied strategy.
    Custom(&'static str),
}

/// `None` when the pattern matches nowhere; `Some` with the entries that
/// survived conversion otherwise, possibly none.
pub type ExtractFn = fn(&str) -> Option<Vec<ParsedEntry>>;

/// One step of the free-text cascade: a tag plus a pure extractor.
#[derive(Debug, Clone, Copy)]
pub struct FreeTextStrategy {
    pub pattern: FreeTextPattern,
    pub extract: ExtractFn,
}

impl FreeTextStrategy {
    #[must_use]
    pub const fn new(pattern: FreeTextPattern, extract: ExtractFn) -> Self {
        Self { pattern, extract }
    }
}

/// Built-in cascade, tried in order.
pub const DEFAULT_STRATEGIES: [FreeTextStrategy; 3] = [
    FreeTextStrategy::new(FreeTextPattern::Labeled, extract_labeled),
    FreeTextStrategy::new(FreeTextPattern::SpaceSeparated, extract_space_separated),
    FreeTextStrategy::new(FreeTextPattern::Assignment, extract_assignment),
];

const NUMBER: &str = r"(-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)([KM%])?";

static LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"([A-Za-z][A-Za-z0-9 _&'/()]*?)\s*(?::|-|–|\$)\s*\$?\s*{NUMBER}"
    ))
    .expect("valid labeled regex")
});

static SPACE_SEPARATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"([A-Za-z][A-Za-z_&']*(?: [A-Za-z][A-Za-z_&']*)*)\s+\$?{NUMBER}"
    ))
    .expect("valid space-separated regex")
});

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"([A-Za-z][A-Za-z0-9_ ]*?)\s*=\s*\$?{NUMBER}"))
        .expect("valid assignment regex")
});

pub fn extract_labeled(text: &str) -> Option<Vec<ParsedEntry>> {
    collect_matches(&LABELED, text)
}

pub fn extract_space_separated(text: &str) -> Option<Vec<ParsedEntry>> {
    collect_matches(&SPACE_SEPARATED, text)
}

pub fn extract_assignment(text: &str) -> Option<Vec<ParsedEntry>> {
    collect_matches(&ASSIGNMENT, text)
}

/// Runs `strategies` in order and stops at the first one whose pattern
/// matches. Later strategies are never invoked and matches are never merged
/// across strategies; a match whose values are all unusable (an overflowing
/// digit run, say) ends the cascade with `None`.
pub fn parse_free_text_with(
    strategies: &[FreeTextStrategy],
    text: &str,
) -> Option<(FreeTextPattern, Vec<ParsedEntry>)> {
    let (pattern, entries) = strategies.iter().find_map(|strategy| {
        (strategy.extract)(text).map(|entries| (strategy.pattern, entries))
    })?;
    if entries.is_empty() {
        debug!(?pattern, "free-text pattern matched but yielded no usable entries");
        return None;
    }
    Some((pattern, entries))
}

#[must_use]
pub fn parse_free_text(text: &str) -> Option<(FreeTextPattern, Vec<ParsedEntry>)> {
    parse_free_text_with(&DEFAULT_STRATEGIES, text)
}

fn collect_matches(pattern: &Regex, text: &str) -> Option<Vec<ParsedEntry>> {
    let mut matched = false;
    let entries = pattern
        .captures_iter(text)
        .inspect(|_| matched = true)
        .filter_map(capture_entry)
        .collect();
    matched.then_some(entries)
}

fn capture_entry(captures: Captures<'_>) -> Option<ParsedEntry> {
    let label = captures.get(1)?.as_str();
    let digits: String = captures
        .get(2)?
        .as_str()
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    let number = digits.parse::<f64>().ok()?;
    let unit = captures.get(3).map(|unit| unit.as_str());
    ParsedEntry::new(label, apply_unit(number, unit))
}

/// `K` thousands, `M` millions, `%` fraction of one.
pub(crate) fn apply_unit(number: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("K") => number * 1_000.0,
        Some("M") => number * 1_000_000.0,
        Some("%") => number / 100.0,
        _ => number,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_unit, extract_assignment, extract_labeled, extract_space_separated};

    #[test]
    fn unit_suffixes_scale_values() {
        assert_eq!(apply_unit(12.0, Some("K")), 12_000.0);
        assert_eq!(apply_unit(3.0, Some("M")), 3_000_000.0);
        assert_eq!(apply_unit(50.0, Some("%")), 0.5);
        assert_eq!(apply_unit(7.0, None), 7.0);
    }

    #[test]
    fn labeled_strategy_reads_colon_dash_and_dollar_forms() {
        let entries =
            extract_labeled("Revenue: $12K, Cost - 40\nBudget $3M. Loss: -5").expect("match");
        let pairs: Vec<(&str, f64)> = entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.value))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Revenue", 12_000.0),
                ("Cost", 40.0),
                ("Budget", 3_000_000.0),
                ("Loss", -5.0)
            ]
        );
    }

    #[test]
    fn labeled_strategy_skips_sentence_punctuation_in_labels() {
        let entries = extract_labeled("Sales grew. Q1 Revenue: 1,250").expect("match");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "Q1 Revenue");
        assert_eq!(entries[0].value, 1_250.0);
    }

    #[test]
    fn space_separated_strategy_reads_multi_word_labels() {
        let entries = extract_space_separated("Green Apples 30 Oranges 20%").expect("match");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Green Apples");
        assert_eq!(entries[1].value, 0.2);
    }

    #[test]
    fn assignment_strategy_reads_equals_pairs() {
        let entries = extract_assignment("north = 12\nsouth=7.5K").expect("match");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].label, "south");
        assert_eq!(entries[1].value, 7_500.0);
    }

    #[test]
    fn unmatched_text_is_none_and_unusable_matches_are_empty() {
        assert_eq!(extract_assignment("no pairs here"), None);

        let overflowing = format!("Revenue: {}", "9".repeat(400));
        assert_eq!(extract_labeled(&overflowing), Some(Vec::new()));
    }
}
