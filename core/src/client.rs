//! Stateless HTTP request builder and response parser for the club API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The methods are generic over `Resource` / `SingletonResource`, so the
//! per-entity API surface (events, news, products, ...) is the same code
//! parameterized by the entity's path and payload type.
//!
//! Response handling is uniform across JSON and multipart writes: a non-2xx
//! status fails with the server's `message`, and so does a 2xx body that
//! carries `success: false`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, GENERIC_FAILURE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::resources::{Draft, ListFilter, Resource, Retrievable, SingletonResource};

/// Synchronous, stateless client for the club API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_all<R: Resource>(&self, filter: Option<&R::Filter>) -> HttpRequest {
        let query = filter
            .map(|f| f.query())
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let path = if query.is_empty() {
            self.url(R::PATH)
        } else {
            format!("{}?{query}", self.url(R::PATH))
        };
        self.request(HttpMethod::Get, path, RequestBody::Empty)
    }

    pub fn build_get_by_id<R: Retrievable>(&self, id: R::Id) -> HttpRequest {
        self.request(HttpMethod::Get, self.member_url::<R>(id), RequestBody::Empty)
    }

    pub fn build_create<R: Resource>(&self, draft: &R::Draft) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Post, self.url(R::PATH), draft.to_body()?))
    }

    pub fn build_update<R: Resource>(&self, id: R::Id, draft: &R::Draft) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Put, self.member_url::<R>(id), draft.to_body()?))
    }

    pub fn build_delete<R: Resource>(&self, id: R::Id) -> HttpRequest {
        self.request(HttpMethod::Delete, self.member_url::<R>(id), RequestBody::Empty)
    }

    pub fn build_get_singleton<S: SingletonResource>(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.url(S::PATH), RequestBody::Empty)
    }

    /// Singletons are updated in place; the path carries no id.
    pub fn build_update_singleton<S: SingletonResource>(&self, draft: &S::Draft) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Put, self.url(S::PATH), draft.to_body()?))
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        parse_data(response)
    }

    pub fn parse_record<R: Resource>(&self, response: HttpResponse) -> Result<R, ApiError> {
        parse_data(response)
    }

    pub fn parse_singleton<S: SingletonResource>(&self, response: HttpResponse) -> Result<S, ApiError> {
        parse_data(response)
    }

    /// Deletes only need a successful envelope; any `data` is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_envelope(response).map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn member_url<R: Resource>(&self, id: R::Id) -> String {
        format!("{}{}/{id}", self.base_url, R::PATH)
    }

    fn request(&self, method: HttpMethod, path: String, body: RequestBody) -> HttpRequest {
        let headers = match body {
            RequestBody::Json(_) => vec![("content-type".to_string(), "application/json".to_string())],
            RequestBody::Empty | RequestBody::Multipart(_) => Vec::new(),
        };
        tracing::debug!(method = method.as_str(), %path, "built request");
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

/// Check the status and envelope, then deserialize the `data` member.
pub fn parse_data<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let mut envelope = check_envelope(response)?;
    let data = envelope
        .as_object_mut()
        .and_then(|obj| obj.remove("data"))
        .ok_or_else(|| ApiError::Deserialization("response has no `data` member".to_string()))?;
    serde_json::from_value(data).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map a response to its parsed JSON body or the matching `ApiError`.
fn check_envelope(response: HttpResponse) -> Result<Value, ApiError> {
    let parsed: Result<Value, _> = if response.body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(&response.body)
    };

    if !response.is_success() {
        let body = parsed.map_err(|_| ApiError::Network(format!("HTTP {} with unreadable body", response.status)))?;
        let message = server_message(&body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
        tracing::debug!(status = response.status, %message, "request failed");
        return Err(if response.status == 404 {
            ApiError::NotFound { message }
        } else {
            ApiError::Http {
                status: response.status,
                message,
            }
        });
    }

    let body = parsed.map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = server_message(&body).unwrap_or_else(|| GENERIC_FAILURE.to_string());
        tracing::debug!(status = response.status, %message, "write rejected by server");
        return Err(ApiError::Rejected { message });
    }
    Ok(body)
}

fn server_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
