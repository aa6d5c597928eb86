//! One sampling session: dispatch, chart, report.
mod output;
mod runner;


pub use output::print_report;
pub use runner::run_sampler;
