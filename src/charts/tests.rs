use tempfile::tempdir;

use super::{CHART_SIZE_PX, render_latency_chart};
use crate::error::{AppError, AppResult};
use crate::metrics::SampleSet;

#[test]
fn render_latency_chart_writes_png() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("graph.png");
    let samples = SampleSet::from(vec![120, 45, 300, 45, 200]);

    let written = render_latency_chart(&samples, &path)?;
    if !written {
        return Err(AppError::validation("Expected chart to be written"));
    }
    let bytes = std::fs::read(&path)?;
    if !bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Err(AppError::validation("Chart is not a PNG file"));
    }
    Ok(())
}

#[test]
fn render_latency_chart_uses_square_canvas() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("graph.png");
    render_latency_chart(&SampleSet::from(vec![7]), &path)?;

    let bytes = std::fs::read(&path)?;
    let width = bytes
        .get(16..20)
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map(u32::from_be_bytes);
    let height = bytes
        .get(20..24)
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map(u32::from_be_bytes);
    if width != Some(CHART_SIZE_PX) || height != Some(CHART_SIZE_PX) {
        return Err(AppError::validation(format!(
            "Unexpected canvas {:?}x{:?}",
            width, height
        )));
    }
    Ok(())
}

#[test]
fn render_latency_chart_skips_empty_samples() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("graph.png");

    let written = render_latency_chart(&SampleSet::default(), &path)?;
    if written || path.exists() {
        return Err(AppError::validation("Empty samples must not produce a chart"));
    }
    Ok(())
}
