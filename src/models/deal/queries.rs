use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Owner;
use super::types::*;

const COLUMNS: &str = "id, title, description, value, currency, stage, probability, priority, \
                       close_date, contact_id, company_id, assigned_to, source, deal_type, notes, \
                       tags, competitors, next_steps, loss_reason, won_at, created_by, company, \
                       created_at, updated_at";

/// All deals created by `owner`, newest first.
pub async fn find_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Deal>, sqlx::Error> {
    sqlx::query_as::<_, Deal>(&format!(
        "SELECT {COLUMNS} FROM deals WHERE created_by = $1 ORDER BY created_at DESC"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn find_by_company(pool: &PgPool, company: &str) -> Result<Vec<Deal>, sqlx::Error> {
    sqlx::query_as::<_, Deal>(&format!(
        "SELECT {COLUMNS} FROM deals WHERE company = $1 ORDER BY created_at DESC"
    ))
    .bind(company)
    .fetch_all(pool)
    .await
}

pub async fn find_owned(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Deal>, sqlx::Error> {
    sqlx::query_as::<_, Deal>(&format!(
        "SELECT {COLUMNS} FROM deals WHERE id = $1 AND created_by = $2"
    ))
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn create(pool: &PgPool, owner: &Owner, p: &DealPayload) -> Result<Deal, sqlx::Error> {
    sqlx::query_as::<_, Deal>(&format!(
        "INSERT INTO deals (title, description, value, currency, stage, probability, priority, \
                            close_date, contact_id, company_id, assigned_to, source, deal_type, \
                            notes, tags, competitors, next_steps, loss_reason, won_at, \
                            created_by, company) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 $18, $19, $20, $21) \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.title)
    .bind(&p.description)
    .bind(p.value)
    .bind(&p.currency)
    .bind(p.stage.as_str())
    .bind(p.probability)
    .bind(p.priority.as_str())
    .bind(p.close_date)
    .bind(p.contact_id)
    .bind(p.company_id)
    .bind(p.assigned_to)
    .bind(&p.source)
    .bind(&p.deal_type)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(&p.competitors)
    .bind(&p.next_steps)
    .bind(&p.loss_reason)
    .bind(p.won_at)
    .bind(owner.user_id)
    .bind(&owner.company)
    .fetch_one(pool)
    .await
}

/// Full-form edit. Returns `None` when the deal is not `owner`'s. An edit
/// without a win date keeps the stored one.
pub async fn update(pool: &PgPool, owner: Uuid, id: Uuid, p: &DealPayload) -> Result<Option<Deal>, sqlx::Error> {
    sqlx::query_as::<_, Deal>(&format!(
        "UPDATE deals SET title = $1, description = $2, value = $3, currency = $4, stage = $5, \
                probability = $6, priority = $7, close_date = $8, contact_id = $9, \
                company_id = $10, assigned_to = $11, source = $12, deal_type = $13, notes = $14, \
                tags = $15, competitors = $16, next_steps = $17, loss_reason = $18, \
                won_at = COALESCE($19, won_at), \
                updated_at = NOW() \
         WHERE id = $20 AND created_by = $21 \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.title)
    .bind(&p.description)
    .bind(p.value)
    .bind(&p.currency)
    .bind(p.stage.as_str())
    .bind(p.probability)
    .bind(p.priority.as_str())
    .bind(p.close_date)
    .bind(p.contact_id)
    .bind(p.company_id)
    .bind(p.assigned_to)
    .bind(&p.source)
    .bind(&p.deal_type)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(&p.competitors)
    .bind(&p.next_steps)
    .bind(&p.loss_reason)
    .bind(p.won_at)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

/// Stage-only write from the board. Touches no other column, not even `updated_at`.
pub async fn update_stage(pool: &PgPool, owner: Uuid, id: Uuid, stage: Stage) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE deals SET stage = $1 WHERE id = $2 AND created_by = $3")
        .bind(stage.as_str())
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM deals WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------- Aggregates (company scope) ----------

pub async fn count_in_stage(pool: &PgPool, company: &str, stage: Stage) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM deals WHERE company = $1 AND stage = $2")
        .bind(company)
        .bind(stage.as_str())
        .fetch_one(pool)
        .await
}

pub async fn sum_won_value(pool: &PgPool, company: &str) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COALESCE(SUM(value), 0)::FLOAT8 FROM deals WHERE company = $1 AND stage = 'won'",
    )
    .bind(company)
    .fetch_one(pool)
    .await
}

/// Won deals with their win date. Deals never stamped with `won_at` come back
/// with `won_on = None` and are left out of the revenue trend.
pub async fn find_won(pool: &PgPool, company: &str) -> Result<Vec<WonDeal>, sqlx::Error> {
    sqlx::query_as::<_, WonDeal>(
        "SELECT value, won_at AS won_on \
         FROM deals WHERE company = $1 AND stage = 'won'",
    )
    .bind(company)
    .fetch_all(pool)
    .await
}
