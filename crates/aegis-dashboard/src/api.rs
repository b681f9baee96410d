//! HTTP API client for the AegisX auth transport.
//!
//! All functions use gloo-net to call the REST API with JSON bodies
//! and Bearer token auth. Base URL is relative (same origin).

use std::fmt;

use gloo_net::http::{Request, Response};

use crate::types::{ApiEnvelope, ApiErrorResponse, LoginRequest, RegisterRequest, SessionData};

/// API failure, mostly a message for the UI. `Unauthorized` is split
/// out because the session layer reacts to it: a 401 on an
/// authenticated endpoint means the server has invalidated the token
/// regardless of what its expiry claim says. Login and register never
/// produce it; a 401 there is just bad credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized,
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Session expired or unauthorized"),
            ApiError::Other(message) => write!(f, "{message}"),
        }
    }
}

/// Ergonomic result alias.
pub type ApiResult<T> = Result<T, ApiError>;

fn auth_header(token: &str) -> String {
    format!("Bearer {token}")
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Other(e.to_string())
}

fn classify(status: u16, auth_endpoint: bool, message: Option<String>) -> ApiError {
    if status == 401 && !auth_endpoint {
        return ApiError::Unauthorized;
    }
    match message {
        Some(m) => ApiError::Other(format!("{status}: {m}")),
        None => ApiError::Other(format!("HTTP {status}")),
    }
}

/// Parse a non-2xx response. `auth_endpoint` marks login/register,
/// where a 401 is a credential failure rather than a dead session.
async fn parse_error(resp: Response, auth_endpoint: bool) -> ApiError {
    let status = resp.status();
    let message = resp.json::<ApiErrorResponse>().await.ok().map(|e| e.message);
    classify(status, auth_endpoint, message)
}

/// Unwrap the `{success, message, data}` envelope into its payload.
fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, what: &str) -> ApiResult<T> {
    match envelope.data {
        Some(data) if envelope.success => Ok(data),
        _ => Err(ApiError::Other(
            envelope.message.unwrap_or_else(|| format!("{what} failed")),
        )),
    }
}

// ── Auth ────────────────────────────────────────────────────────────

pub async fn login(email: &str, password: &str) -> ApiResult<SessionData> {
    let body = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let resp = Request::post("/api/users/login")
        .json(&body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    if resp.ok() {
        let envelope = resp.json().await.map_err(transport)?;
        unwrap_envelope(envelope, "login")
    } else {
        Err(parse_error(resp, true).await)
    }
}

pub async fn register(body: &RegisterRequest) -> ApiResult<SessionData> {
    let resp = Request::post("/api/users/register")
        .json(body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    if resp.ok() {
        let envelope = resp.json().await.map_err(transport)?;
        unwrap_envelope(envelope, "registration")
    } else {
        Err(parse_error(resp, true).await)
    }
}

pub async fn logout(token: &str) -> ApiResult<()> {
    let resp = Request::post("/api/users/logout")
        .header("Authorization", &auth_header(token))
        .header("Content-Type", "application/json")
        .body("{}")
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    if resp.ok() {
        Ok(())
    } else {
        Err(parse_error(resp, false).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_only_on_authenticated_endpoints() {
        assert_eq!(classify(401, false, None), ApiError::Unauthorized);

        // On login/register a 401 is just a message for the form.
        assert_eq!(
            classify(401, true, Some("Invalid credentials".into())),
            ApiError::Other("401: Invalid credentials".into()),
        );
    }

    #[test]
    fn other_statuses_keep_the_server_message() {
        assert_eq!(
            classify(500, false, Some("boom".into())),
            ApiError::Other("500: boom".into()),
        );
        assert_eq!(classify(502, false, None), ApiError::Other("HTTP 502".into()));
    }
}
