//! Dish endpoint calls.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds get stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every endpoint answers `{success, error?}`. Bodies are read as text and
//! decoded here, so a non-JSON reply (an HTML error page, a login redirect)
//! becomes [`ApiError::Malformed`] instead of a generic transport error.
//! Nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ApiResponse, Dish};

pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
pub const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
pub const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    /// Body was not the expected JSON; carries the decoder message.
    #[error("invalid server response")]
    Malformed(String),
    /// `success: false`; carries the server's message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("response did not include a dish")]
    MissingDish,
    #[error("not available outside the browser")]
    Unavailable,
}

pub fn dish_get_endpoint(prefix: &str, dish_id: &str) -> String {
    format!("{prefix}/{dish_id}/get/")
}

pub fn dish_delete_endpoint(prefix: &str, dish_id: &str) -> String {
    format!("{prefix}/{dish_id}/delete/")
}

/// Decode a response body and turn `success: false` into an error.
///
/// # Errors
///
/// [`ApiError::Malformed`] for non-JSON bodies, [`ApiError::Rejected`] when
/// the server reports failure.
pub fn parse_response(body: &str) -> Result<ApiResponse, ApiError> {
    let resp: ApiResponse = serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    if resp.success {
        return Ok(resp);
    }
    let message = resp.error.filter(|m| !m.is_empty()).unwrap_or_else(|| "unknown error".to_owned());
    Err(ApiError::Rejected(message))
}

/// Text for the blocking alert shown when `action` fails.
pub fn alert_message(action: &str, err: &ApiError) -> String {
    match err {
        ApiError::Malformed(_) => "Error: invalid server response".to_owned(),
        ApiError::Rejected(message) => format!("Failed to {action}: {message}"),
        other => format!("Failed to {action}: {other}"),
    }
}

/// Pull the dish out of a successful `get` response.
///
/// # Errors
///
/// Returns [`ApiError::MissingDish`] when the envelope has none.
pub fn take_dish(resp: ApiResponse) -> Result<Dish, ApiError> {
    resp.dish.ok_or(ApiError::MissingDish)
}

#[cfg(feature = "hydrate")]
async fn read_envelope(resp: gloo_net::http::Response) -> Result<ApiResponse, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let parsed = parse_response(&body);
    if let Err(ApiError::Malformed(detail)) = &parsed {
        log::error!("non-JSON response (status {status}): {detail}");
    }
    parsed
}

/// POST the dish form (create or update) to `url`.
///
/// # Errors
///
/// Transport, decoding, or server-reported failure.
#[cfg(feature = "hydrate")]
pub async fn save_dish(url: &str, form: &web_sys::FormData) -> Result<(), ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
        .body(form.clone())
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_envelope(resp).await.map(|_| ())
}

/// Fetch one dish for editing.
///
/// # Errors
///
/// Transport, decoding, server-reported failure, or a missing `dish`.
pub async fn fetch_dish(prefix: &str, dish_id: &str) -> Result<Dish, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = dish_get_endpoint(prefix, dish_id);
        let resp = gloo_net::http::Request::get(&url)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        take_dish(read_envelope(resp).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (prefix, dish_id);
        Err(ApiError::Unavailable)
    }
}

/// Delete one dish.
///
/// # Errors
///
/// Transport, decoding, or server-reported failure.
pub async fn delete_dish(prefix: &str, dish_id: &str, csrf_token: Option<&str>) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = dish_delete_endpoint(prefix, dish_id);
        let mut req = gloo_net::http::Request::post(&url).header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE);
        if let Some(token) = csrf_token {
            req = req.header(CSRF_HEADER, token);
        }
        let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        read_envelope(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (prefix, dish_id, csrf_token);
        Err(ApiError::Unavailable)
    }
}
