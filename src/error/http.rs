use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL '{url}' is missing a host.")]
    UrlMissingHost { url: String },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request timed out: {source}")]
    TimedOut {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request failed: {source}")]
    SendFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read response body: {source}")]
    ReadBodyFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected status {status} (expected {expected}).")]
    UnexpectedStatus { status: u16, expected: u16 },
    #[error("Request {index} failed: {source}")]
    RequestFailed {
        index: usize,
        #[source]
        source: Box<HttpError>,
    },
    #[error("Dispatch worker failed to join: {source}")]
    WorkerJoin {
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Failed to record sample: {source}")]
    RecordSample {
        #[source]
        source: super::MetricsError,
    },
    #[error("Request queue lock was poisoned.")]
    QueuePoisoned,
    #[error("Dispatch worker {worker} panicked.")]
    WorkerPanicked { worker: usize },
    #[error("Dispatch finished with {actual} of {expected} samples.")]
    DispatchIncomplete { expected: usize, actual: usize },
    #[cfg(test)]
    #[error("Injected failure: {message}")]
    Injected { message: &'static str },
}

impl HttpError {
    /// Wraps a per-request failure with the iteration index it belongs to.
    #[must_use]
    pub fn for_request(index: usize, source: Self) -> Self {
        HttpError::RequestFailed {
            index,
            source: Box::new(source),
        }
    }

    /// Iteration index of the failing request, if this error names one.
    #[must_use]
    pub const fn request_index(&self) -> Option<usize> {
        match self {
            HttpError::RequestFailed { index, .. } => Some(*index),
            HttpError::InvalidUrl { .. }
            | HttpError::UrlMissingHost { .. }
            | HttpError::UnsupportedScheme { .. }
            | HttpError::InvalidHeaderName { .. }
            | HttpError::InvalidHeaderValue { .. }
            | HttpError::BuildClientFailed { .. }
            | HttpError::TimedOut { .. }
            | HttpError::SendFailed { .. }
            | HttpError::ReadBodyFailed { .. }
            | HttpError::UnexpectedStatus { .. }
            | HttpError::WorkerJoin { .. }
            | HttpError::RecordSample { .. }
            | HttpError::QueuePoisoned
            | HttpError::WorkerPanicked { .. }
            | HttpError::DispatchIncomplete { .. } => None,
            #[cfg(test)]
            HttpError::Injected { .. } => None,
        }
    }
}
