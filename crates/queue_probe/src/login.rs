//! Token retrieval through the HTTP login endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::config::LoginSettings;
use crate::error::ProbeError;

/// Characters of the token shown in logs.
const TOKEN_PREVIEW_CHARS: usize = 20;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Shortened form of a token, safe to print.
pub fn token_preview(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    format!("{preview}...")
}

/// HTTP endpoint for the login call. WebSocket schemes map back to their
/// HTTP counterparts.
pub fn login_url(server: &Url, login: &LoginSettings) -> Result<Url, ProbeError> {
    let mut base = server.clone();
    let scheme = match server.scheme() {
        "ws" => Some("http"),
        "wss" => Some("https"),
        _ => None,
    };
    if let Some(scheme) = scheme {
        // ws/wss and http/https are all special schemes, so this cannot fail.
        let _ = base.set_scheme(scheme);
    }
    base.join(&login.path)
        .map_err(|e| ProbeError::InvalidUrl(login.path.clone(), e))
}

/// Logs in and returns the issued token.
///
/// # Errors
///
/// [`ProbeError::LoginRejected`] for a non-success status (the response body
/// is kept for the log), [`ProbeError::LoginRequest`] for transport or
/// decoding failures.
pub async fn fetch_token(server: &Url, login: &LoginSettings) -> Result<String, ProbeError> {
    let endpoint = login_url(server, login)?;
    info!("🔑 Logging in as {} via {}", login.identifier, endpoint);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(login.timeout_secs))
        .build()?;

    let response = client
        .post(endpoint)
        .json(&LoginRequest {
            identifier: &login.identifier,
            password: &login.password,
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProbeError::LoginRejected {
            status: status.as_u16(),
            body,
        });
    }

    let LoginResponse { token } = response.json().await?;
    info!("Got token: {}", token_preview(&token));
    Ok(token)
}
