use actix_session::Session;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms;
use crate::models::activity;
use crate::models::lead::{LeadFilter, LeadForm};
use crate::store::RecordStore;
use super::{Refreshed, acting_owner};

/// GET /api/leads?search=&status=&source=
pub async fn list(
    store: web::Data<dyn RecordStore>,
    session: Session,
    query: web::Query<LeadFilter>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let leads: Vec<_> = store
        .list_leads(owner.user_id)
        .await?
        .into_iter()
        .filter(|l| query.matches(l))
        .collect();
    Ok(HttpResponse::Ok().json(leads))
}

pub async fn create(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<LeadForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let lead = store.insert_lead(&owner, &payload).await?;
    activity::record(store.get_ref(), &owner, "lead", "New lead added".to_string(), Some(lead.full_name())).await;

    let items = store.list_leads(owner.user_id).await?;
    Ok(HttpResponse::Created().json(Refreshed::new(lead, items)))
}

pub async fn update(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<LeadForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let lead = store
        .update_lead(owner.user_id, path.into_inner(), &payload)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = store.list_leads(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::new(lead, items)))
}

pub async fn delete(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    if !store.delete_lead(owner.user_id, path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    let items = store.list_leads(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::list(items)))
}
