use super::data::{ColorFill, DatasetColors};

/// Palette used when input carries no colors of its own.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
    "#6366F1", "#84CC16",
];

/// Hex alpha suffix appended to line-family fills (~20% opacity).
pub const LINE_FILL_ALPHA: &str = "33";

#[must_use]
pub fn default_color(index: usize) -> &'static str {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// Colors assigned to the dataset at `index` when none were supplied.
///
/// Same index, same colors: normalization stays byte-for-byte repeatable.
#[must_use]
pub fn default_dataset_colors(index: usize) -> DatasetColors {
    let color = default_color(index);
    DatasetColors {
        background_color: ColorFill::Single(color.to_owned()),
        border_color: Some(color.to_owned()),
    }
}

/// Appends a hex alpha channel to a `#RRGGBB` color.
///
/// Anything that is not a six-digit hex color is returned unchanged.
#[must_use]
pub fn with_alpha(color: &str, alpha_hex: &str) -> String {
    let is_rgb_hex = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|ch| ch.is_ascii_hexdigit());
    if is_rgb_hex {
        format!("{color}{alpha_hex}")
    } else {
        color.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PALETTE, default_color, with_alpha};

    #[test]
    fn default_color_cycles_through_palette() {
        assert_eq!(default_color(0), DEFAULT_PALETTE[0]);
        assert_eq!(default_color(DEFAULT_PALETTE.len() + 2), DEFAULT_PALETTE[2]);
    }

    #[test]
    fn alpha_only_applies_to_plain_hex_colors() {
        assert_eq!(with_alpha("#3B82F6", "33"), "#3B82F633");
        assert_eq!(with_alpha("rgb(1, 2, 3)", "33"), "rgb(1, 2, 3)");
        assert_eq!(with_alpha("#3B82F680", "33"), "#3B82F680");
    }
}
