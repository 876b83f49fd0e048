use actix_session::Session;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms;
use crate::models::activity;
use crate::models::contact::{ContactFilter, ContactForm};
use crate::store::RecordStore;
use super::{Refreshed, acting_owner};

/// GET /api/contacts?search=
pub async fn list(
    store: web::Data<dyn RecordStore>,
    session: Session,
    query: web::Query<ContactFilter>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let contacts: Vec<_> = store
        .list_contacts(owner.user_id)
        .await?
        .into_iter()
        .filter(|c| query.matches(c))
        .collect();
    Ok(HttpResponse::Ok().json(contacts))
}

pub async fn create(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let contact = store.insert_contact(&owner, &payload).await?;
    activity::record(store.get_ref(), &owner, "contact", "New contact added".to_string(), Some(contact.full_name())).await;

    let items = store.list_contacts(owner.user_id).await?;
    Ok(HttpResponse::Created().json(Refreshed::new(contact, items)))
}

pub async fn update(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let contact = store
        .update_contact(owner.user_id, path.into_inner(), &payload)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = store.list_contacts(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::new(contact, items)))
}

pub async fn delete(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    if !store.delete_contact(owner.user_id, path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    let items = store.list_contacts(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::list(items)))
}
