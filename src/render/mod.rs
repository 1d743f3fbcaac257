mod null_renderer;

pub use null_renderer::NullRenderer;

use crate::config::ChartConfig;
use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully built, immutable [`ChartConfig`] so drawing code
/// stays isolated from parsing, validation and caching.
pub trait ChartRenderer {
    fn render(&mut self, config: &ChartConfig) -> ChartResult<()>;
}
