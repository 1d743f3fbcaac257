use crate::config::ChartConfig;
use crate::core::ChartKind;
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

/// No-op renderer used by tests and headless pipeline usage.
///
/// It still checks label alignment so tests can catch malformed data before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_kind: Option<ChartKind>,
    pub last_dataset_count: usize,
    pub last_label_count: usize,
}

impl ChartRenderer for NullRenderer {
    fn render(&mut self, config: &ChartConfig) -> ChartResult<()> {
        let data = config.data();
        if !config.kind().is_point_based() {
            if let Some(dataset) = data
                .datasets
                .iter()
                .find(|dataset| dataset.data.len() != data.labels.len())
            {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{}` has {} values for {} labels",
                    dataset.label,
                    dataset.data.len(),
                    data.labels.len()
                )));
            }
        }
        self.render_count += 1;
        self.last_kind = Some(config.kind());
        self.last_dataset_count = data.datasets.len();
        self.last_label_count = data.labels.len();
        Ok(())
    }
}
