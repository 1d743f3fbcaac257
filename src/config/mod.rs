mod animation;
mod builder;
mod options;
mod theme;

pub use animation::{AnimationSetting, DEFAULT_ANIMATION_DURATION_MS, Easing};
pub use builder::{ChartConfig, ChartConfigBuilder};
pub use theme::Theme;
