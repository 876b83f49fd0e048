use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Owner;
use super::types::*;

const COLUMNS: &str = "id, name, website, industry, size, revenue, phone, email, address, city, \
                       state, zip_code, country, description, tags, social_media, created_by, \
                       company, created_at, updated_at";

pub async fn find_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "SELECT {COLUMNS} FROM companies WHERE created_by = $1 ORDER BY name"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, owner: &Owner, p: &CompanyPayload) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "INSERT INTO companies (name, website, industry, size, revenue, phone, email, address, \
                                city, state, zip_code, country, description, tags, social_media, \
                                created_by, company) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.name)
    .bind(&p.website)
    .bind(&p.industry)
    .bind(&p.size)
    .bind(&p.revenue)
    .bind(&p.phone)
    .bind(&p.email)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(&p.description)
    .bind(&p.tags)
    .bind(&p.social_media)
    .bind(owner.user_id)
    .bind(&owner.company)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, owner: Uuid, id: Uuid, p: &CompanyPayload) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(&format!(
        "UPDATE companies SET name = $1, website = $2, industry = $3, size = $4, revenue = $5, \
                phone = $6, email = $7, address = $8, city = $9, state = $10, zip_code = $11, \
                country = $12, description = $13, tags = $14, social_media = $15, \
                updated_at = NOW() \
         WHERE id = $16 AND created_by = $17 \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.name)
    .bind(&p.website)
    .bind(&p.industry)
    .bind(&p.size)
    .bind(&p.revenue)
    .bind(&p.phone)
    .bind(&p.email)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(&p.description)
    .bind(&p.tags)
    .bind(&p.social_media)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// First companies row with exactly this name (case-sensitive).
pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM companies WHERE name = $1 ORDER BY created_at LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn find_name(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT name FROM companies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
