use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::{Partner, User};

/// Request body for replacing the caller's partner details. Everything is
/// optional at the serde level so missing credentials reach the handler's
/// auth check instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRequest {
    pub user_id: Option<String>,
    pub session_token: Option<String>,
    pub partner_name: Option<String>,
    pub partner_phone: Option<String>,
    pub partner_email: Option<String>,
}

/// Public part of the user returned to clients. The password hash and the
/// session token never pass through here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<Partner>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            phone: user.phone,
            email: user.email,
            partner: user.partner.map(|p| p.0),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response for a successful partner update.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "A".into(),
            phone: "111".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$fake".into(),
            session_token: Some("deadbeef".into()),
            partner: Some(Json(Partner {
                name: "B".into(),
                phone: "222".into(),
                email: "b@x.com".into(),
            })),
            created_at: datetime!(2024-05-01 12:00 UTC),
            updated_at: datetime!(2024-05-02 12:00 UTC),
        }
    }

    #[test]
    fn public_user_never_serializes_credentials() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("sessionToken"));
        assert!(!json.contains("session_token"));
        assert!(!json.contains("deadbeef"));
        assert!(json.contains(r#""partner":{"name":"B""#));
        assert!(json.contains(r#""createdAt":"2024-05-01T12:00:00Z""#));
    }

    #[test]
    fn public_user_omits_partner_when_unset() {
        let mut user = sample_user();
        user.partner = None;
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(!json.contains("partner"));
    }

    #[test]
    fn update_request_uses_camel_case_keys() {
        let body = r#"{
            "userId": "2c2b9a2e-6f21-4a9e-b7f5-0d4c8cf9c6a1",
            "sessionToken": "tok",
            "partnerName": "B",
            "partnerPhone": "222",
            "partnerEmail": "b@x.com"
        }"#;
        let req: UpdatePartnerRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.session_token.as_deref(), Some("tok"));
        assert_eq!(req.partner_phone.as_deref(), Some("222"));
    }

    #[test]
    fn update_request_tolerates_missing_fields() {
        let req: UpdatePartnerRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none());
        assert!(req.session_token.is_none());
    }
}
