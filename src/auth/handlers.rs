use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthRequest, AuthResponse},
        password::{hash_password, verify_password},
        token::generate_session_token,
    },
    error::{ApiError, EMAIL_TAKEN, PHONE_TAKEN},
    state::AppState,
    users::{dto::PublicUser, repo_types::User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(auth))
}

/// POST /api/auth — single endpoint dispatching on `action`.
#[instrument(skip(state, payload))]
pub async fn auth(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let phone = trimmed(payload.phone.as_deref());
    let password = trimmed(payload.password.as_deref());
    let name = trimmed(payload.name.as_deref());
    let email = trimmed(payload.email.as_deref());

    match payload.action.as_deref().map(str::trim) {
        Some("login") => login(&state, phone, password).await,
        Some("register") => register(&state, name, phone, email, password).await,
        other => {
            warn!(action = ?other, "unknown auth action");
            Err(ApiError::Validation("Invalid action.".into()))
        }
    }
}

async fn register(
    state: &AppState,
    name: Option<&str>,
    phone: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(name), Some(phone), Some(email), Some(password)) = (name, phone, email, password)
    else {
        warn!("register with missing fields");
        return Err(ApiError::Validation("All fields are required.".into()));
    };

    // Checked before the insert so the client gets a field-specific message.
    // A concurrent insert can still slip through; the unique violation then
    // maps to the same message via `From<sqlx::Error>`.
    if User::find_by_phone(&state.db, phone).await?.is_some() {
        warn!(phone, "phone already registered");
        return Err(ApiError::Conflict(PHONE_TAKEN.into()));
    }
    if User::find_by_email(&state.db, email).await?.is_some() {
        warn!(email, "email already registered");
        return Err(ApiError::Conflict(EMAIL_TAKEN.into()));
    }

    let hash = hash_password(password)?;
    let session_token = generate_session_token();
    let user = User::create(&state.db, name, phone, email, &hash, &session_token).await?;

    info!(user_id = %user.id, phone = %user.phone, "user registered");
    Ok(Json(AuthResponse {
        success: true,
        user: PublicUser::from(user),
        session_token,
    }))
}

async fn login(
    state: &AppState,
    identifier: Option<&str>,
    password: Option<&str>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(identifier), Some(password)) = (identifier, password) else {
        warn!("login with missing credentials");
        return Err(ApiError::Validation(
            "Phone/email and password are required.".into(),
        ));
    };

    // An identifier containing `@` is looked up as an email, otherwise as a
    // phone number.
    let is_email = identifier.contains('@');
    let user = if is_email {
        User::find_by_email(&state.db, identifier).await?
    } else {
        User::find_by_phone(&state.db, identifier).await?
    };
    let Some(user) = user else {
        warn!(identifier, "login for unknown account");
        return Err(ApiError::Auth(
            if is_email {
                "No account found with this email."
            } else {
                "No account found with this phone number."
            }
            .into(),
        ));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::Auth("Incorrect password. Please try again.".into()));
    }

    // Rotating the token invalidates any previously issued session.
    let session_token = generate_session_token();
    let user = User::set_session_token(&state.db, user.id, &session_token).await?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        user: PublicUser::from(user),
        session_token,
    }))
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_normalizes_whitespace_and_blanks() {
        assert_eq!(trimmed(Some("  a@x.com ")), Some("a@x.com"));
        assert_eq!(trimmed(Some("\t\n")), None);
        assert_eq!(trimmed(None), None);
    }
}
