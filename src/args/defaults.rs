pub(crate) const DEFAULT_USER_AGENT: &str = concat!("reqtime/", env!("CARGO_PKG_VERSION"));

/// Requests fired per run when nothing else is configured.
pub(crate) const DEFAULT_REQUESTS: usize = 1000;
pub(crate) const DEFAULT_CONCURRENCY: &str = "4";
pub(crate) const DEFAULT_TOKEN_HEADER: &str = "X-Token";
pub(crate) const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub(crate) const DEFAULT_BODY_TEMPLATE: &str = r#"{"context": {"__name":"example{{index}}"}}"#;
pub(crate) const DEFAULT_CHART_PATH: &str = "graph.png";
pub(crate) const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_CONNECT_TIMEOUT: &str = "5s";
