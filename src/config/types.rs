use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parse_duration_arg};
use crate::error::{AppResult, ValidationError};

/// On-disk run configuration. Every key mirrors a CLI flag.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub requests: Option<usize>,
    pub concurrency: Option<usize>,
    pub token: Option<String>,
    pub token_header: Option<String>,
    pub headers: Option<Vec<String>>,
    pub body_template: Option<String>,
    pub content_type: Option<String>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub status: Option<u16>,
    pub chart_path: Option<String>,
    pub no_chart: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero.into()),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
