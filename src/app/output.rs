use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::RunReport;

/// Writes the report to stdout in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn print_report(report: &RunReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            for line in text_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

pub(crate) fn text_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    match report.summary.as_ref() {
        Some(summary) => {
            lines.push(format!("Requests: {}", summary.count));
            lines.push(format!("AverageRequestTime = {}ms", summary.avg_ms));
            lines.push(format!("MaxRequestTime = {}ms", summary.max_ms));
            lines.push(format!("MinRequestTime = {}ms", summary.min_ms));
        }
        None => lines.push("Requests: 0".to_owned()),
    }
    lines.push(format!("Wall Time: {}ms", report.wall_time_ms));

    let samples: Vec<String> = report
        .samples_ms
        .iter()
        .map(|value| value.to_string())
        .collect();
    lines.push(format!("[{}]", samples.join(", ")));
    lines
}
