use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms;
use crate::models::activity;
use crate::models::task::{TaskFilter, TaskForm, TaskStats};
use crate::store::RecordStore;
use super::{Refreshed, acting_owner};

/// GET /api/tasks?priority=&status=
pub async fn list(
    store: web::Data<dyn RecordStore>,
    session: Session,
    query: web::Query<TaskFilter>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let tasks: Vec<_> = store
        .list_tasks(owner.user_id)
        .await?
        .into_iter()
        .filter(|t| query.matches(t))
        .collect();
    Ok(HttpResponse::Ok().json(tasks))
}

/// GET /api/tasks/stats - counts over all of the user's tasks, unfiltered
pub async fn stats(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let tasks = store.list_tasks(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(TaskStats::from_tasks(&tasks, Utc::now().date_naive())))
}

pub async fn create(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let task = store.insert_task(&owner, &payload).await?;
    activity::record(store.get_ref(), &owner, "task", "New task created".to_string(), Some(task.title.clone())).await;

    let items = store.list_tasks(owner.user_id).await?;
    Ok(HttpResponse::Created().json(Refreshed::new(task, items)))
}

pub async fn update(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<TaskForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let task = store
        .update_task(owner.user_id, path.into_inner(), &payload)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = store.list_tasks(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::new(task, items)))
}

/// POST /api/tasks/{id}/toggle - completed <-> pending
pub async fn toggle(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let owner = acting_owner(&session, store.get_ref()).await?;
    let task = store.find_task(owner.user_id, id).await?.ok_or(AppError::NotFound)?;

    let (status, completed_at) = task.toggled(Utc::now().date_naive());
    if !store.set_task_status(owner.user_id, id, status, completed_at).await? {
        return Err(AppError::NotFound);
    }

    let items = store.list_tasks(owner.user_id).await?;
    let task = items.iter().find(|t| t.id == id).cloned().ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(Refreshed::new(task, items)))
}

pub async fn delete(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    if !store.delete_task(owner.user_id, path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    let items = store.list_tasks(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::list(items)))
}
