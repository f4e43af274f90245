//! Executing `HttpRequest` values against the network.
//!
//! The core never performs I/O on its own; a `Transport` is the one place
//! that does. `UreqTransport` is the blocking implementation used by the
//! `Dispatcher` and the integration tests. No retries, timeouts or caching
//! are layered on top.

use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;

/// Performs one HTTP round-trip.
///
/// Non-2xx statuses are data, not errors: only failures to obtain a
/// response at all (DNS, refused connection, broken body) map to
/// `ApiError::Network`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "executing request");

        let payload = match req.body {
            RequestBody::Empty => None,
            RequestBody::Json(json) => Some((None, json.into_bytes())),
            RequestBody::Multipart(form) => {
                let boundary = format!("----club-{}", uuid::Uuid::new_v4().simple());
                Some((Some(MultipartForm::content_type(&boundary)), form.encode(&boundary)))
            }
        };

        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), &req.headers).call(),
            HttpMethod::Post | HttpMethod::Put => {
                let builder = if req.method == HttpMethod::Post {
                    self.agent.post(&req.path)
                } else {
                    self.agent.put(&req.path)
                };
                let builder = with_headers(builder, &req.headers);
                match payload {
                    Some((Some(content_type), bytes)) => builder.content_type(content_type).send(&bytes[..]),
                    Some((None, bytes)) => builder.send(&bytes[..]),
                    None => builder.send_empty(),
                }
            }
        };

        let response = result.map_err(|e| ApiError::Network(e.to_string()))?;
        into_http_response(response)
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn into_http_response(mut response: Response<Body>) -> Result<HttpResponse, ApiError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(HttpResponse { status, headers, body })
}
