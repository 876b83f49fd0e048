use actix_session::Session;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms;
use crate::models::company::CompanyForm;
use crate::store::RecordStore;
use super::{Refreshed, acting_owner};

pub async fn list(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let companies = store.list_companies(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(companies))
}

pub async fn create(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<CompanyForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let company = store.insert_company(&owner, &payload).await?;
    let items = store.list_companies(owner.user_id).await?;
    Ok(HttpResponse::Created().json(Refreshed::new(company, items)))
}

pub async fn update(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<CompanyForm>,
) -> Result<HttpResponse, AppError> {
    let payload = forms::prepare(body.into_inner())?;
    let owner = acting_owner(&session, store.get_ref()).await?;
    let company = store
        .update_company(owner.user_id, path.into_inner(), &payload)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = store.list_companies(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::new(company, items)))
}

pub async fn delete(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    if !store.delete_company(owner.user_id, path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    let items = store.list_companies(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::list(items)))
}
