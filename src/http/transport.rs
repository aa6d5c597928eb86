use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;

use crate::{
    args::{DEFAULT_USER_AGENT, SamplerArgs},
    error::{AppError, AppResult, HttpError},
};

use super::request::RequestDescriptor;

/// Performs exactly one outbound call per descriptor and reports the status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<u16, HttpError>;
}

/// Production transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client with the configured request/connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend or client cannot be initialized.
    pub fn from_args(args: &SamplerArgs) -> AppResult<Self> {
        let client = build_client(args.request_timeout, args.connect_timeout)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<u16, HttpError> {
        let (method, url, headers, body) = request.into_parts();
        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(classify_send_error)?;
        let status = response.status().as_u16();
        let bytes = drain_response_body(response).await.map_err(|err| {
            if err.is_timeout() {
                HttpError::TimedOut { source: err }
            } else {
                HttpError::ReadBodyFailed { source: err }
            }
        })?;
        debug!("Response {} ({} bytes)", status, bytes);
        Ok(status)
    }
}

fn build_client(request_timeout: Duration, connect_timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

fn classify_send_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::TimedOut { source: err }
    } else {
        HttpError::SendFailed { source: err }
    }
}

/// Reads the body to the end so the measured latency covers the full response.
async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
