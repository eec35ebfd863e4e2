//! Authenticated GET against the REST API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::traits::{Headers, HttpClient, HttpError};

/// Headers carrying HTTP basic auth with the API key as username.
pub fn basic_auth_headers(api_key: &str, password: &str) -> Headers {
    let credentials = STANDARD.encode(format!("{}:{}", api_key, password));
    let mut headers = Headers::new();
    headers.insert("Authorization".to_string(), format!("Basic {}", credentials));
    headers
}

/// GET `url` with basic auth and return the whole body.
///
/// The status code is not checked: an error page comes back as a body and
/// fails later when it is decoded.
pub async fn get(
    http: &dyn HttpClient,
    api_key: &str,
    password: &str,
    url: &str,
) -> Result<Bytes, HttpError> {
    let response = http.get(url, &basic_auth_headers(api_key, password)).await?;
    if !response.is_success() {
        tracing::debug!("GET {} returned status {}", url, response.status);
    }
    Ok(response.body)
}
