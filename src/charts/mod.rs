mod latency;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::{info, warn};

use crate::error::{AppError, AppResult, ChartError};
use crate::metrics::{LatencySummary, SampleSet};

pub use latency::{CHART_SIZE_PX, plot_request_times};

/// Renders the per-request latency chart to `path`.
///
/// Returns `Ok(false)` without touching the filesystem when there are no
/// samples to plot.
///
/// # Errors
///
/// Returns an error when the parent directory cannot be created or the
/// image cannot be drawn and saved.
pub fn render_latency_chart(samples: &SampleSet, path: &Path) -> AppResult<bool> {
    let Some(summary) = LatencySummary::from_samples(samples) else {
        warn!("No samples recorded; skipping chart.");
        return Ok(false);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| {
            AppError::chart(ChartError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })
        })?;
    }

    info!("Plotting request times to {}", path.display());
    plot_request_times(samples, &summary, path).map_err(|err| {
        AppError::chart(ChartError::Draw {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    Ok(true)
}
