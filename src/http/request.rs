use reqwest::{
    Method, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};

use crate::{
    args::{HttpMethod, SamplerArgs},
    error::{AppError, AppResult, HttpError, ValidationError},
};

const INDEX_PLACEHOLDER: &str = "{{index}}";

/// One outbound request, bound to its iteration index.
///
/// Built once per index and handed to the transport by value, so each
/// descriptor is sent at most once.
#[derive(Debug)]
pub struct RequestDescriptor {
    index: usize,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: String,
}

impl RequestDescriptor {
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn into_parts(self) -> (Method, Url, HeaderMap, String) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Validated request shape shared by every descriptor of a run.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body_template: String,
}

impl RequestTemplate {
    /// Validates the URL and headers up front.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is not an absolute http(s) URL or a
    /// header name/value is not valid HTTP.
    pub fn new(
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body_template: &str,
    ) -> AppResult<Self> {
        let url = parse_target_url(url)?;
        let mut header_map = HeaderMap::with_capacity(headers.len());
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderName {
                    header: key.clone(),
                    source: err,
                })
            })?;
            let val = HeaderValue::from_str(value).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderValue {
                    header: key.clone(),
                    source: err,
                })
            })?;
            header_map.insert(name, val);
        }

        Ok(Self {
            method: to_method(method),
            url,
            headers: header_map,
            body_template: body_template.to_owned(),
        })
    }

    /// Builds the template from CLI/config values.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or invalid, or a header
    /// cannot be encoded.
    pub fn from_args(args: &SamplerArgs) -> AppResult<Self> {
        let url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        Self::new(args.method, url, &build_headers(args), &args.body_template)
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn descriptor(&self, index: usize) -> RequestDescriptor {
        RequestDescriptor {
            index,
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: render_body(&self.body_template, index),
        }
    }
}

/// Produces `count` descriptors with indices `0..count`.
#[must_use]
pub fn build_descriptors(template: &RequestTemplate, count: usize) -> Vec<RequestDescriptor> {
    (0..count).map(|index| template.descriptor(index)).collect()
}

pub(crate) fn render_body(template: &str, index: usize) -> String {
    template.replace(INDEX_PLACEHOLDER, &index.to_string())
}

/// Content-Type first, then the token, then user headers; later entries
/// replace earlier ones with the same name.
fn build_headers(args: &SamplerArgs) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(args.headers.len().saturating_add(2));
    if !args.content_type.is_empty() {
        headers.push((CONTENT_TYPE.as_str().to_owned(), args.content_type.clone()));
    }
    if let Some(token) = args.token.as_ref() {
        headers.push((args.token_header.clone(), token.clone()));
    }
    headers.extend(args.headers.iter().cloned());
    headers
}

fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::http(HttpError::UnsupportedScheme {
                scheme: scheme.to_owned(),
            }));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::http(HttpError::UrlMissingHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}
