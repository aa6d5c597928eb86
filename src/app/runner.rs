use std::path::Path;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{error, info};

use crate::args::SamplerArgs;
use crate::charts::render_latency_chart;
use crate::error::AppResult;
use crate::http::{Dispatcher, ReqwestTransport, RequestTemplate, Transport, build_descriptors};
use crate::metrics::{LatencySummary, RunReport};

/// Runs one sampling session against the configured endpoint.
///
/// # Errors
///
/// Returns the first request failure, or an error when the request template,
/// the HTTP client, or the chart cannot be built.
pub async fn run_sampler(args: &SamplerArgs) -> AppResult<RunReport> {
    let transport = Arc::new(ReqwestTransport::from_args(args)?);
    run_sampler_with(args, transport).await
}

pub(crate) async fn run_sampler_with<T>(args: &SamplerArgs, transport: Arc<T>) -> AppResult<RunReport>
where
    T: Transport + 'static,
{
    let template = RequestTemplate::from_args(args)?;
    let requests = build_descriptors(&template, args.requests);
    info!(
        "Sampling {} {} requests to {} with concurrency {}",
        args.requests,
        args.method.as_str(),
        template.url(),
        args.concurrency.get()
    );

    let started = Instant::now();
    let samples = Dispatcher::new(transport, args.concurrency)
        .with_expected_status(args.expected_status)
        .dispatch(requests)
        .await
        .inspect_err(|err| match err.request_index() {
            Some(index) => error!("Request {} failed, aborting run: {}", index, err),
            None => error!("Dispatch failed: {}", err),
        })?;
    let wall_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let summary = LatencySummary::from_samples(&samples);
    if !args.no_chart {
        render_latency_chart(&samples, Path::new(&args.chart_path))?;
    }

    Ok(RunReport {
        summary,
        wall_time_ms,
        samples_ms: samples,
    })
}
