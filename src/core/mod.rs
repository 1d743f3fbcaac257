pub mod chart_kind;
pub mod data;
pub mod palette;
pub mod types;

pub use chart_kind::{ChartFamily, ChartKind};
pub use data::{ChartData, ColorFill, DataValue, Dataset, DatasetColors, ParsedEntry, PointRecord};
pub use palette::{
    DEFAULT_PALETTE, LINE_FILL_ALPHA, default_color, default_dataset_colors, with_alpha,
};
pub use types::Viewport;
