use serde::{Deserialize, Serialize};

use crate::users::dto::PublicUser;

/// Request body for the auth endpoint; `action` selects login or register.
/// For login, `phone` carries the identifier — a phone number or an
/// email-shaped string.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub action: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Response returned after login or register. The session token appears here
/// once, beside the sanitized user, and nowhere else.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: PublicUser,
    pub session_token: String,
}
