use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, SamplerArgs, parse_header};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// Values passed on the command line or through an environment variable win
/// over the file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut SamplerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.as_ref()
    {
        args.url = Some(url.clone());
    }

    if !is_explicit(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_explicit(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = PositiveUsize::try_from(concurrency).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "concurrency",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "token")
        && let Some(token) = config.token.as_ref()
    {
        args.token = Some(token.clone());
    }

    if !is_explicit(matches, "token_header")
        && let Some(token_header) = config.token_header.as_ref()
    {
        args.token_header.clone_from(token_header);
    }

    if !is_explicit(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        args.headers = parse_headers(headers)?;
    }

    if !is_explicit(matches, "body_template")
        && let Some(body_template) = config.body_template.as_ref()
    {
        args.body_template.clone_from(body_template);
    }

    if !is_explicit(matches, "content_type")
        && let Some(content_type) = config.content_type.as_ref()
    {
        args.content_type.clone_from(content_type);
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "timeout")?;
    }

    if !is_explicit(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = config_duration(timeout, "connect_timeout")?;
    }

    if !is_explicit(matches, "expected_status")
        && let Some(status) = config.status
    {
        args.expected_status = Some(status);
    }

    if !is_explicit(matches, "chart_path")
        && let Some(chart_path) = config.chart_path.as_ref()
    {
        args.chart_path.clone_from(chart_path);
    }

    if !is_explicit(matches, "no_chart")
        && let Some(no_chart) = config.no_chart
    {
        args.no_chart = no_chart;
    }

    if !is_explicit(matches, "output_format")
        && let Some(output_format) = config.output_format
    {
        args.output_format = output_format;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn parse_headers(headers: &[String]) -> AppResult<Vec<(String, String)>> {
    let mut parsed = Vec::with_capacity(headers.len());
    for header in headers {
        parsed.push(
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
        );
    }
    Ok(parsed)
}

fn config_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| match err {
        AppError::Validation(source) => {
            AppError::config(ConfigError::InvalidDuration { field, source })
        }
        other @ (AppError::Io { .. }
        | AppError::Clap { .. }
        | AppError::Json { .. }
        | AppError::Config(_)
        | AppError::Http(_)
        | AppError::Metrics(_)
        | AppError::Chart(_)) => other,
    })
}
