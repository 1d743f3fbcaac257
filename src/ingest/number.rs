use std::sync::LazyLock;

use regex::Regex;

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid leading-float regex")
});

/// Reads the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"12.5kg"` reads as `12.5`, `"1.2.3"` as `1.2`, `"abc"` as nothing.
pub(crate) fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let matched = LEADING_FLOAT.find(text)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// CSV value cell: everything except digits, `.` and `-` is dropped first,
/// so `"$12,000"` reads as `12000`.
pub(crate) fn parse_numeric_cell(cell: &str) -> Option<f64> {
    let kept: String = cell
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-'))
        .collect();
    parse_leading_float(&kept)
}
