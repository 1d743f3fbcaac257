use std::borrow::Cow;

#[cfg(feature = "parallel-aggregation")]
use rayon::prelude::*;
use tracing::debug;

use crate::core::{ChartData, Dataset};

/// Downsamples `data` so the total point count across datasets fits
/// `max_points`.
///
/// Within budget the input is returned borrowed without copying. Otherwise
/// `stride = ceil(total / max_points)` and only indices that are multiples
/// of `stride` survive, in labels and every dataset alike, so alignment is
/// preserved. A budget of zero is treated as one.
#[must_use]
pub fn aggregate(data: &ChartData, max_points: usize) -> Cow<'_, ChartData> {
    let budget = max_points.max(1);
    let total = data.total_points();
    if total <= budget {
        return Cow::Borrowed(data);
    }

    let stride = total.div_ceil(budget);
    debug!(total, budget, stride, "downsampling chart data");

    Cow::Owned(ChartData {
        labels: keep_every(&data.labels, stride),
        datasets: downsample_datasets(&data.datasets, stride),
    })
}

#[cfg(not(feature = "parallel-aggregation"))]
fn downsample_datasets(datasets: &[Dataset], stride: usize) -> Vec<Dataset> {
    datasets
        .iter()
        .map(|dataset| downsample_dataset(dataset, stride))
        .collect()
}

#[cfg(feature = "parallel-aggregation")]
fn downsample_datasets(datasets: &[Dataset], stride: usize) -> Vec<Dataset> {
    datasets
        .par_iter()
        .map(|dataset| downsample_dataset(dataset, stride))
        .collect()
}

fn downsample_dataset(dataset: &Dataset, stride: usize) -> Dataset {
    Dataset {
        label: dataset.label.clone(),
        data: keep_every(&dataset.data, stride),
        colors: dataset.colors.clone(),
    }
}

fn keep_every<T: Clone>(items: &[T], stride: usize) -> Vec<T> {
    items.iter().step_by(stride).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::keep_every;

    #[test]
    fn keep_every_selects_stride_multiples() {
        let kept = keep_every(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(kept, [0, 3, 6]);
    }
}
