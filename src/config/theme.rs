use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PALETTE, default_color};

/// Named palette plus the surface colors options are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub palette: Vec<String>,
    pub background_color: String,
    pub text_color: String,
    pub grid_color: String,
}

struct BuiltinTheme {
    name: &'static str,
    palette: &'static [&'static str],
    background_color: &'static str,
    text_color: &'static str,
    grid_color: &'static str,
}

const BUILTIN_THEMES: [BuiltinTheme; 5] = [
    BuiltinTheme {
        name: "default",
        palette: &DEFAULT_PALETTE,
        background_color: "#FFFFFF",
        text_color: "#1F2937",
        grid_color: "#E5E7EB",
    },
    BuiltinTheme {
        name: "dark",
        palette: &[
            "#60A5FA", "#34D399", "#FBBF24", "#F87171", "#A78BFA", "#F472B6", "#2DD4BF",
            "#FB923C",
        ],
        background_color: "#111827",
        text_color: "#F9FAFB",
        grid_color: "#374151",
    },
    BuiltinTheme {
        name: "light",
        palette: &[
            "#2563EB", "#059669", "#D97706", "#DC2626", "#7C3AED", "#DB2777", "#0D9488",
            "#EA580C",
        ],
        background_color: "#F9FAFB",
        text_color: "#111827",
        grid_color: "#D1D5DB",
    },
    BuiltinTheme {
        name: "vibrant",
        palette: &[
            "#FF006E", "#FB5607", "#FFBE0B", "#3A86FF", "#8338EC", "#06D6A0", "#EF476F",
        ],
        background_color: "#FFFFFF",
        text_color: "#0F172A",
        grid_color: "#E2E8F0",
    },
    BuiltinTheme {
        name: "pastel",
        palette: &[
            "#A5B4FC", "#6EE7B7", "#FCD34D", "#FCA5A5", "#C4B5FD", "#F9A8D4", "#99F6E4",
        ],
        background_color: "#FFFBF5",
        text_color: "#374151",
        grid_color: "#F3E8FF",
    },
];

impl BuiltinTheme {
    fn to_theme(&self) -> Theme {
        Theme {
            name: self.name.to_owned(),
            palette: self.palette.iter().map(|color| (*color).to_owned()).collect(),
            background_color: self.background_color.to_owned(),
            text_color: self.text_color.to_owned(),
            grid_color: self.grid_color.to_owned(),
        }
    }
}

impl Theme {
    /// Looks up a built-in theme, ignoring case.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim();
        BUILTIN_THEMES
            .iter()
            .find(|builtin| builtin.name.eq_ignore_ascii_case(name))
            .map(BuiltinTheme::to_theme)
    }

    #[must_use]
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_THEMES.iter().map(|builtin| builtin.name).collect()
    }

    /// Palette color for dataset `index`, cycling; an empty palette falls
    /// back to the default palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return default_color(index);
        }
        &self.palette[index % self.palette.len()]
    }

    /// Full palette, or the default palette when this one is empty.
    #[must_use]
    pub fn resolved_palette(&self) -> Vec<String> {
        if self.palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|color| (*color).to_owned()).collect()
        } else {
            self.palette.clone()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        BUILTIN_THEMES[0].to_theme()
    }
}
