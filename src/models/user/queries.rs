use sqlx::PgPool;
use uuid::Uuid;

use super::types::*;

const PROFILE_COLUMNS: &str = "id, email, first_name, last_name, company, role, created_at";

pub async fn create(pool: &PgPool, new: &NewUser) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(&format!(
        "INSERT INTO users (email, password_hash, first_name, last_name, company, role) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.company)
    .bind(&new.role)
    .fetch_one(pool)
    .await
}

/// Find credentials by email for authentication (case-insensitive).
pub async fn find_credentials(pool: &PgPool, email: &str) -> Result<Option<Credentials>, sqlx::Error> {
    sqlx::query_as::<_, Credentials>(
        "SELECT id, email, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_profile(pool: &PgPool, id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(&format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_names(
    pool: &PgPool,
    id: Uuid,
    first_name: &str,
    last_name: &str,
) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(&format!(
        "UPDATE users SET first_name = $1, last_name = $2 WHERE id = $3 RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Users sharing a company scalar, alphabetical.
pub async fn find_by_company(pool: &PgPool, company: &str) -> Result<Vec<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM users WHERE company = $1 ORDER BY first_name, last_name"
    ))
    .bind(company)
    .fetch_all(pool)
    .await
}

pub async fn find_names(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<UserName>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, UserName>("SELECT id, first_name, last_name FROM users WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}
