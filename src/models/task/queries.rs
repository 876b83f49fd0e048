use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::Owner;
use super::types::*;

const COLUMNS: &str = "id, title, description, priority, status, due_date, due_time, assigned_to, \
                       linked_to, linked_type, category, estimated_hours, actual_hours, \
                       is_recurring, recurring_type, reminder_before, notes, tags, attachments, \
                       completed_at, created_by, company, created_at, updated_at";

/// Owner's tasks, earliest due first.
pub async fn find_by_owner(pool: &PgPool, owner: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {COLUMNS} FROM tasks WHERE created_by = $1 ORDER BY due_date ASC NULLS LAST"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn find_owned(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {COLUMNS} FROM tasks WHERE id = $1 AND created_by = $2"
    ))
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_company(pool: &PgPool, company: &str) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {COLUMNS} FROM tasks WHERE company = $1 ORDER BY due_date ASC NULLS LAST"
    ))
    .bind(company)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, owner: &Owner, p: &TaskPayload) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (title, description, priority, status, due_date, due_time, \
                            assigned_to, linked_to, linked_type, category, estimated_hours, \
                            actual_hours, is_recurring, recurring_type, reminder_before, notes, \
                            tags, attachments, completed_at, created_by, company) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
                 $18, $19, $20, $21) \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.title)
    .bind(&p.description)
    .bind(&p.priority)
    .bind(p.status.as_str())
    .bind(p.due_date)
    .bind(&p.due_time)
    .bind(p.assigned_to)
    .bind(&p.linked_to)
    .bind(&p.linked_type)
    .bind(&p.category)
    .bind(p.estimated_hours)
    .bind(p.actual_hours)
    .bind(p.is_recurring)
    .bind(&p.recurring_type)
    .bind(&p.reminder_before)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(&p.attachments)
    .bind(p.completed_at)
    .bind(owner.user_id)
    .bind(&owner.company)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, owner: Uuid, id: Uuid, p: &TaskPayload) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks SET title = $1, description = $2, priority = $3, status = $4, \
                due_date = $5, due_time = $6, assigned_to = $7, linked_to = $8, \
                linked_type = $9, category = $10, estimated_hours = $11, actual_hours = $12, \
                is_recurring = $13, recurring_type = $14, reminder_before = $15, notes = $16, \
                tags = $17, attachments = $18, updated_at = NOW() \
         WHERE id = $19 AND created_by = $20 \
         RETURNING {COLUMNS}"
    ))
    .bind(&p.title)
    .bind(&p.description)
    .bind(&p.priority)
    .bind(p.status.as_str())
    .bind(p.due_date)
    .bind(&p.due_time)
    .bind(p.assigned_to)
    .bind(&p.linked_to)
    .bind(&p.linked_type)
    .bind(&p.category)
    .bind(p.estimated_hours)
    .bind(p.actual_hours)
    .bind(p.is_recurring)
    .bind(&p.recurring_type)
    .bind(&p.reminder_before)
    .bind(&p.notes)
    .bind(&p.tags)
    .bind(&p.attachments)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

pub async fn set_status(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    status: TaskStatus,
    completed_at: Option<NaiveDate>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tasks SET status = $1, completed_at = $2, updated_at = NOW() \
         WHERE id = $3 AND created_by = $4",
    )
    .bind(status.as_str())
    .bind(completed_at)
    .bind(id)
    .bind(owner)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_due_on(pool: &PgPool, company: &str, day: NaiveDate) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE company = $1 AND due_date = $2")
        .bind(company)
        .bind(day)
        .fetch_one(pool)
        .await
}
