//! API utilities for frontend-backend communication
//!
//! Every report endpoint is a same-origin GET with a flat query string that
//! answers JSON, so a single helper covers all of them.

use crate::shared::error::RequestError;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Build a request URL from a path and a flat parameter record
///
/// `None` fields are skipped by the parameter types themselves.
///
/// # Example
/// ```rust,ignore
/// let url = build_url("/balanco-receita/api/gerar", &params)?;
/// ```
pub fn build_url<P: Serialize>(path: &str, params: &P) -> Result<String, RequestError> {
    let query = serde_qs::to_string(params)
        .map_err(|e| RequestError::Decode(format!("parâmetros inválidos: {}", e)))?;
    if query.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, query))
    }
}

/// Issue one GET and decode the JSON body
///
/// Non-2xx responses become [`RequestError::Http`] carrying the server's own
/// error message when the body has one.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, RequestError> {
    log::debug!("GET {}", url);

    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            log::error!("GET {} failed: {}", url, e);
            RequestError::Network(e.to_string())
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RequestError::Network(e.to_string()))?;

    if !response.ok() {
        let err = RequestError::from_response(status, &body);
        log::error!("GET {} -> HTTP {}: {}", url, status, err);
        return Err(err);
    }

    serde_json::from_str(&body).map_err(|e| {
        log::error!("GET {}: unexpected payload: {}", url, e);
        RequestError::Decode(e.to_string())
    })
}

/// `build_url` + `get_json`
pub async fn get_with_params<P: Serialize, T: DeserializeOwned>(
    path: &str,
    params: &P,
) -> Result<T, RequestError> {
    let url = build_url(path, params)?;
    get_json(&url).await
}
