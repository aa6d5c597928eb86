mod app;
mod chart;
mod config;
mod http;
mod metrics;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use chart::ChartError;
pub(crate) use chart::PlottersError;
pub use config::ConfigError;
pub use http::HttpError;
pub use metrics::MetricsError;
pub use validation::ValidationError;
