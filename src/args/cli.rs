use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_BODY_TEMPLATE, DEFAULT_CHART_PATH, DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT,
    DEFAULT_CONTENT_TYPE, DEFAULT_REQUEST_TIMEOUT, DEFAULT_REQUESTS, DEFAULT_TOKEN_HEADER,
};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_header, parse_positive_usize};
use super::types::{HttpMethod, OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fires a fixed number of HTTP requests with bounded concurrency, then charts their latency."
)]
pub struct SamplerArgs {
    /// Target URL (fixed for the whole run)
    #[arg(long, short, env = "REQTIME_URL")]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "post", ignore_case = true)]
    pub method: HttpMethod,

    /// Total number of requests to send
    #[arg(long, short = 'n', default_value_t = DEFAULT_REQUESTS)]
    pub requests: usize,

    /// Maximum number of requests in flight at once
    #[arg(
        long,
        short = 'c',
        default_value = DEFAULT_CONCURRENCY,
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Token sent with every request
    #[arg(long, env = "REQTIME_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Header name that carries the token
    #[arg(long = "token-header", default_value = DEFAULT_TOKEN_HEADER)]
    pub token_header: String,

    /// Extra HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body; `{{index}}` is replaced by the request's iteration index
    #[arg(long = "body-template", short = 'd', default_value = DEFAULT_BODY_TEMPLATE)]
    pub body_template: String,

    /// Content-Type header
    #[arg(long = "content-type", short = 'T', default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Connect timeout (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = DEFAULT_CONNECT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Fail the run when a response status differs from this code
    #[arg(long = "status", short = 's')]
    pub expected_status: Option<u16>,

    /// Where to write the latency chart (PNG)
    #[arg(long = "chart-path", short = 'o', default_value = DEFAULT_CHART_PATH)]
    pub chart_path: String,

    /// Skip rendering the chart
    #[arg(long = "no-chart")]
    pub no_chart: bool,

    /// What to print on stdout once the run completes
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON). Defaults to ./reqtime.toml or ./reqtime.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by REQTIME_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
