use std::path::Path;

use plotters::prelude::*;

use crate::error::PlottersError;
use crate::metrics::{LatencySummary, SampleSet};

/// 170 mm at 96 DPI.
pub const CHART_SIZE_PX: u32 = 642;

const HEADER_HEIGHT_PX: u32 = 96;
const HEADER_LINE_Y: [i32; 3] = [12, 40, 68];
const SERIES_LABEL: &str = "Response Time";

/// Draws request number against latency with the summary as a header.
///
/// # Errors
///
/// Returns the backend error when drawing or saving the bitmap fails.
pub fn plot_request_times(
    samples: &SampleSet,
    summary: &LatencySummary,
    path: &Path,
) -> Result<(), PlottersError> {
    let root = BitMapBackend::new(path, (CHART_SIZE_PX, CHART_SIZE_PX)).into_drawing_area();
    root.fill(&WHITE)?;

    let (header, body) = root.split_vertically(HEADER_HEIGHT_PX);
    let header_lines = [
        format!("AverageRequestTime = {}ms", summary.avg_ms),
        format!("MaxRequestTime = {}ms", summary.max_ms),
        format!("MinRequestTime = {}ms", summary.min_ms),
    ];
    let header_style = TextStyle::from(("sans-serif", 20).into_font()).color(&BLACK);
    for (line, y) in header_lines.iter().zip(HEADER_LINE_Y) {
        header.draw_text(line, &header_style, (16, y))?;
    }

    let points: Vec<(u64, u64)> = (1u64..).zip(samples.iter()).collect();
    let x_max = u64::try_from(samples.len())
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let y_max = summary
        .max_ms
        .saturating_add(summary.max_ms.checked_div(10).unwrap_or(0))
        .max(1);

    let mut chart = ChartBuilder::on(&body)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u64..x_max, 0u64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Requests")
        .y_desc("Request Time (ms)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE))?
        .label(SERIES_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x.saturating_add(20), y)], BLUE));
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 3, BLUE.filled())),
    )?;

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}
