use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Contact details of the partner a user has claimed. Written as a whole,
/// never merged field-wise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// User record in the database. Deliberately not `Serialize`: clients only
/// ever see the `PublicUser` projection.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                       // unique user ID
    pub name: String,                   // display name
    pub phone: String,                  // login identifier, globally unique
    pub email: String,                  // alternate login identifier, globally unique
    pub password_hash: String,          // Argon2 hash
    pub session_token: Option<String>,  // bearer credential, rotated on login
    pub partner: Option<Json<Partner>>, // claimed partner details
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Projection returned by partner search: the submitter's name and when the
/// claim was recorded, nothing else.
#[derive(Debug, Clone, FromRow)]
pub struct PartnerMatch {
    pub name: String,
    pub created_at: OffsetDateTime,
}
