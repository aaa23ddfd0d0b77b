use axum::{extract::State, routing::put, Json, Router};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{PublicUser, UpdatePartnerRequest, UserResponse},
        repo_types::{Partner, User},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", put(update_partner))
}

/// PUT /api/users — replace the caller's partner sub-record.
#[instrument(skip(state, payload))]
pub async fn update_partner(
    State(state): State<AppState>,
    Json(payload): Json<UpdatePartnerRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let (Some(user_id), Some(session_token)) = (
        trimmed(payload.user_id.as_deref()),
        trimmed(payload.session_token.as_deref()),
    ) else {
        warn!("partner update without credentials");
        return Err(ApiError::Auth("Unauthorized".into()));
    };

    // Reject malformed ids before touching the database.
    let Ok(user_id) = Uuid::parse_str(user_id) else {
        warn!("partner update with malformed user id");
        return Err(ApiError::Auth("Unauthorized".into()));
    };

    let partner = match (
        trimmed(payload.partner_name.as_deref()),
        trimmed(payload.partner_phone.as_deref()),
        trimmed(payload.partner_email.as_deref()),
    ) {
        (Some(name), Some(phone), Some(email)) => Partner {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        },
        _ => {
            warn!(user_id = %user_id, "partner update with missing fields");
            return Err(ApiError::Validation("All partner fields are required".into()));
        }
    };

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if user.session_token.as_deref() != Some(session_token) {
        warn!(user_id = %user_id, "partner update with invalid session token");
        return Err(ApiError::Auth("Unauthorized".into()));
    }

    let updated = User::set_partner(&state.db, user_id, &partner)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    info!(user_id = %updated.id, "partner details replaced");
    Ok(Json(UserResponse {
        success: true,
        user: PublicUser::from(updated),
    }))
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_rejects_blank_input() {
        assert_eq!(trimmed(Some("  222 ")), Some("222"));
        assert_eq!(trimmed(Some("   ")), None);
        assert_eq!(trimmed(None), None);
    }
}
