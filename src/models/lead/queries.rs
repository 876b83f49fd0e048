use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Owner;
use super::types::*;

const COLUMNS: &str = "id, first_name, last_name, company_name, title, email, phone, website, \
                       source, status, estimated_value, expected_close_date, address, city, \
                       state, zip_code, country, notes, tags, created_by, company, created_at, \
                       updated_at";

pub async fn find_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(&format!(
        "SELECT {COLUMNS} FROM leads WHERE created_by = $1 ORDER BY created_at DESC"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn find_by_company(pool: &PgPool, company: &str) -> Result<Vec<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(&format!(
        "SELECT {COLUMNS} FROM leads WHERE company = $1 ORDER BY created_at DESC"
    ))
    .bind(company)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, owner: &Owner, p: &LeadPayload) -> Result<Lead, sqlx::Error> {
    sqlx::query_as::<_, Lead>(&format!(
        "INSERT INTO leads (first_name, last_name, company_name, title, email, phone, website, \
                            source, status, estimated_value, expected_close_date, address, city, \
                            state, zip_code, country, notes, tags, created_by, company) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 $18, $19, $20) \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.company_name)
    .bind(&p.title)
    .bind(&p.email)
    .bind(&p.phone)
    .bind(&p.website)
    .bind(&p.source)
    .bind(&p.status)
    .bind(p.estimated_value)
    .bind(p.expected_close_date)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(owner.user_id)
    .bind(&owner.company)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, owner: Uuid, id: Uuid, p: &LeadPayload) -> Result<Option<Lead>, sqlx::Error> {
    sqlx::query_as::<_, Lead>(&format!(
        "UPDATE leads SET first_name = $1, last_name = $2, company_name = $3, title = $4, \
                email = $5, phone = $6, website = $7, source = $8, status = $9, \
                estimated_value = $10, expected_close_date = $11, address = $12, city = $13, \
                state = $14, zip_code = $15, country = $16, notes = $17, tags = $18, \
                updated_at = NOW() \
         WHERE id = $19 AND created_by = $20 \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.company_name)
    .bind(&p.title)
    .bind(&p.email)
    .bind(&p.phone)
    .bind(&p.website)
    .bind(&p.source)
    .bind(&p.status)
    .bind(p.estimated_value)
    .bind(p.expected_close_date)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_by_company(pool: &PgPool, company: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM leads WHERE company = $1")
        .bind(company)
        .fetch_one(pool)
        .await
}
