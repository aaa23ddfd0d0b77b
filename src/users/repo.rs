use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::{Partner, PartnerMatch, User};

impl User {
    /// Find a user by phone number.
    pub async fn find_by_phone(db: &PgPool, phone: &str) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            FROM users
            WHERE phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password and an initial session token.
    pub async fn create(
        db: &PgPool,
        name: &str,
        phone: &str,
        email: &str,
        password_hash: &str,
        session_token: &str,
    ) -> sqlx::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, phone, email, password_hash, session_token)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(password_hash)
        .bind(session_token)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Store a freshly issued session token, invalidating the previous one.
    pub async fn set_session_token(db: &PgPool, id: Uuid, token: &str) -> sqlx::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET session_token = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(token)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Replace the partner sub-record as a whole. `None` when the id does not
    /// resolve to a row.
    pub async fn set_partner(db: &PgPool, id: Uuid, partner: &Partner) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET partner = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name, phone, email, password_hash, session_token, partner, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(Json(partner))
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

/// Case-insensitive substring match of an already-escaped pattern against the
/// partner fields of every user that has partner details on file.
pub async fn search_partners(db: &PgPool, pattern: &str) -> sqlx::Result<Vec<PartnerMatch>> {
    let rows = sqlx::query_as::<_, PartnerMatch>(
        r#"
        SELECT name, created_at
        FROM users
        WHERE partner IS NOT NULL
          AND (partner->>'name'  ~* $1
            OR partner->>'phone' ~* $1
            OR partner->>'email' ~* $1)
        "#,
    )
    .bind(pattern)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
