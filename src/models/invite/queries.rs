use sqlx::PgPool;
use uuid::Uuid;

use super::types::*;

const COLUMNS: &str = "id, email, company, role, invited_by, token, status, created_at";

pub async fn create(pool: &PgPool, new: &NewInvite) -> Result<Invite, sqlx::Error> {
    sqlx::query_as::<_, Invite>(&format!(
        "INSERT INTO invites (email, company, role, invited_by, token, status) \
         VALUES ($1, $2, $3, $4, $5, 'pending') RETURNING {COLUMNS}"
    ))
    .bind(&new.email)
    .bind(new.company)
    .bind(&new.role)
    .bind(new.invited_by)
    .bind(&new.token)
    .fetch_one(pool)
    .await
}

pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Invite>, sqlx::Error> {
    sqlx::query_as::<_, Invite>(&format!("SELECT {COLUMNS} FROM invites WHERE token = $1"))
        .bind(token)
        .fetch_optional(pool)
        .await
}

pub async fn find_pending(pool: &PgPool, company: Uuid) -> Result<Vec<Invite>, sqlx::Error> {
    sqlx::query_as::<_, Invite>(&format!(
        "SELECT {COLUMNS} FROM invites WHERE company = $1 AND status = 'pending' \
         ORDER BY created_at DESC"
    ))
    .bind(company)
    .fetch_all(pool)
    .await
}

/// Flip a pending invite to accepted. Returns false if it was not pending.
pub async fn mark_accepted(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE invites SET status = 'accepted' WHERE token = $1 AND status = 'pending'",
    )
    .bind(token)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
