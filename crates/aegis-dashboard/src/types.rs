//! Request/response types for the AegisX auth transport.
//!
//! The transport wraps every body in a `{success, message, data}`
//! envelope with camelCase fields.

use aegis_session::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Standard response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Error body the transport returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub company_name: String,
    pub email: String,
    pub password: String,
}

/// Payload of a successful login/register: the bearer token and the
/// denormalized profile, always issued together.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: UserProfile,
}
