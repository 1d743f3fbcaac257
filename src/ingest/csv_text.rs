use crate::core::ParsedEntry;

use super::number::parse_numeric_cell;

/// Entries read from comma-separated text plus the series name found in a
/// header row, if any.
#[derive(Debug, Default)]
pub(super) struct CsvExtract {
    pub(super) entries: Vec<ParsedEntry>,
    pub(super) series_label: Option<String>,
}

/// Comma present, and either several lines or more than two tokens.
///
/// Text opening like a JSON document is left for the JSON reader.
pub(super) fn looks_like_csv(text: &str) -> bool {
    let opening = text.trim_start();
    if opening.starts_with('[') || opening.starts_with('{') {
        return false;
    }
    text.contains(',') && (text.contains('\n') || text.split(',').count() > 2)
}

pub(super) fn parse_csv(text: &str) -> CsvExtract {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let mut extract = CsvExtract::default();
    if let Some(&first) = lines.peek() {
        let (_, value_cell) = split_row(first);
        let lower = first.to_ascii_lowercase();
        let is_header = lower.contains("label")
            || lower.contains("name")
            || value_cell.and_then(parse_numeric_cell).is_none();
        if is_header {
            extract.series_label = value_cell
                .map(clean_cell)
                .filter(|name| !name.is_empty())
                .map(str::to_owned);
            lines.next();
        }
    }

    for line in lines {
        let (label, value_cell) = split_row(line);
        let Some(value) = value_cell.and_then(parse_numeric_cell) else {
            continue;
        };
        if let Some(entry) = ParsedEntry::new(clean_cell(label), value) {
            extract.entries.push(entry);
        }
    }
    extract
}

/// Splits on the first comma; the value cell keeps any later commas.
fn split_row(line: &str) -> (&str, Option<&str>) {
    match line.split_once(',') {
        Some((label, value)) => (label, Some(value)),
        None => (line, None),
    }
}

fn clean_cell(cell: &str) -> &str {
    cell.trim().trim_matches(|ch| ch == '"' || ch == '\'').trim()
}
