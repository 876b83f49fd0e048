use sqlx::PgPool;

use super::types::*;

pub async fn create(pool: &PgPool, new: &NewActivity) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO activities (company, activity_type, title, description, assigned_to) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(&new.company)
    .bind(&new.activity_type)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.assigned_to)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_recent(pool: &PgPool, company: &str, limit: i64) -> Result<Vec<Activity>, sqlx::Error> {
    sqlx::query_as::<_, Activity>(
        "SELECT id, company, activity_type, title, description, assigned_to, created_at \
         FROM activities WHERE company = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(company)
    .bind(limit)
    .fetch_all(pool)
    .await
}
