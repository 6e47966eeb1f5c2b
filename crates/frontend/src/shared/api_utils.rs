//! API utilities for talking to the server
//!
//! Pages and endpoints share one origin. JSON endpoints go through `gloo-net`;
//! multipart uploads and binary downloads use raw `fetch` in their own modules.

use contracts::shared::api_message::ApiMessage;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::storage;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{}", describe_status(.status, .message))]
    Status { status: u16, message: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// `{success: false, message}` in a 200 response
    #[error("{0}")]
    Business(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

fn describe_status(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with HTTP {}", status),
    }
}

impl ApiError {
    pub fn browser(err: wasm_bindgen::JsValue) -> Self {
        ApiError::Browser(format!("{:?}", err))
    }
}

/// Get the base URL for API requests
///
/// A non-blank `api_base_override` in localStorage wins; otherwise the
/// origin of the current page is used. Empty when there is no window.
pub fn api_base() -> String {
    if let Some(base) = storage::get_api_base_override() {
        return base;
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Append a query string built from `query`; no `?` when it serializes empty
pub fn with_query<Q: Serialize>(url: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", url, qs),
        Ok(_) => url.to_string(),
        Err(e) => {
            log::error!("Failed to encode query for {}: {}", url, e);
            url.to_string()
        }
    }
}

/// Escape one path segment, e.g. a model name containing `/`
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Error for a non-2xx response whose body may carry a JSON `message`
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.trim().is_empty());
    ApiError::Status { status, message }
}

/// Turn a generic `{success, message}` reply into a result
pub fn ensure_success(reply: ApiMessage) -> Result<String, ApiError> {
    if reply.success {
        Ok(reply.message)
    } else if reply.message.trim().is_empty() {
        Err(ApiError::Business("Operation failed".to_string()))
    } else {
        Err(ApiError::Business(reply.message))
    }
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_body(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
