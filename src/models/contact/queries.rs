use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Owner;
use super::types::*;

const COLUMNS: &str = "id, first_name, last_name, company_name, title, department, email, phone, \
                       mobile, website, linkedin, twitter, address, city, state, zip_code, \
                       country, birthday, notes, tags, is_vip, email_opt_in, sms_opt_in, \
                       preferred_contact, timezone, language, created_by, company, created_at, \
                       updated_at";

pub async fn find_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        "SELECT {COLUMNS} FROM contacts WHERE created_by = $1 ORDER BY created_at DESC"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, owner: &Owner, p: &ContactPayload) -> Result<Contact, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        "INSERT INTO contacts (first_name, last_name, company_name, title, department, email, \
                               phone, mobile, website, linkedin, twitter, address, city, state, \
                               zip_code, country, birthday, notes, tags, is_vip, email_opt_in, \
                               sms_opt_in, preferred_contact, timezone, language, created_by, \
                               company) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 $18, $19, $20, $21, $22, $23, $24, $25, $26, $27) \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.company_name)
    .bind(&p.title)
    .bind(&p.department)
    .bind(&p.email)
    .bind(&p.phone)
    .bind(&p.mobile)
    .bind(&p.website)
    .bind(&p.linkedin)
    .bind(&p.twitter)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(p.birthday)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(p.is_vip)
    .bind(p.email_opt_in)
    .bind(p.sms_opt_in)
    .bind(&p.preferred_contact)
    .bind(&p.timezone)
    .bind(&p.language)
    .bind(owner.user_id)
    .bind(&owner.company)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, owner: Uuid, id: Uuid, p: &ContactPayload) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(&format!(
        "UPDATE contacts SET first_name = $1, last_name = $2, company_name = $3, title = $4, \
                department = $5, email = $6, phone = $7, mobile = $8, website = $9, \
                linkedin = $10, twitter = $11, address = $12, city = $13, state = $14, \
                zip_code = $15, country = $16, birthday = $17, notes = $18, tags = $19, \
                is_vip = $20, email_opt_in = $21, sms_opt_in = $22, preferred_contact = $23, \
                timezone = $24, language = $25, updated_at = NOW() \
         WHERE id = $26 AND created_by = $27 \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.company_name)
    .bind(&p.title)
    .bind(&p.department)
    .bind(&p.email)
    .bind(&p.phone)
    .bind(&p.mobile)
    .bind(&p.website)
    .bind(&p.linkedin)
    .bind(&p.twitter)
    .bind(&p.address)
    .bind(&p.city)
    .bind(&p.state)
    .bind(&p.zip_code)
    .bind(&p.country)
    .bind(p.birthday)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(p.is_vip)
    .bind(p.email_opt_in)
    .bind(p.sms_opt_in)
    .bind(&p.preferred_contact)
    .bind(&p.timezone)
    .bind(&p.language)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
