use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms;
use crate::models::activity;
use crate::models::deal::{Deal, DealForm, Stage};
use crate::pipeline::{self, StageMove};
use crate::store::RecordStore;
use super::{Refreshed, acting_owner};

#[derive(Deserialize)]
pub struct StageRequest {
    pub stage: String,
}

#[derive(Serialize)]
pub struct StageResponse {
    pub moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Deal>>,
}

/// GET /api/pipeline - board columns plus summary stats
pub async fn pipeline(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let board = pipeline::load_board(store.get_ref(), owner.user_id).await?;
    Ok(HttpResponse::Ok().json(board))
}

/// GET /api/deals
pub async fn list(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let deals = store.list_deals(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(deals))
}

/// POST /api/deals
pub async fn create(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<DealForm>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let deal = forms::submit_deal(store.get_ref(), &owner, body.into_inner()).await?;
    activity::record(store.get_ref(), &owner, "deal", "New deal created".to_string(), Some(deal.title.clone())).await;

    let items = store.list_deals(owner.user_id).await?;
    Ok(HttpResponse::Created().json(Refreshed::new(deal, items)))
}

/// PUT /api/deals/{id}
pub async fn update(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<DealForm>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    let deal = forms::resubmit_deal(store.get_ref(), &owner, path.into_inner(), body.into_inner()).await?;
    let items = store.list_deals(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::new(deal, items)))
}

/// DELETE /api/deals/{id}
pub async fn delete(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = acting_owner(&session, store.get_ref()).await?;
    if !store.delete_deal(owner.user_id, path.into_inner()).await? {
        return Err(AppError::NotFound);
    }
    let items = store.list_deals(owner.user_id).await?;
    Ok(HttpResponse::Ok().json(Refreshed::list(items)))
}

/// POST /api/deals/{id}/stage - board drag-and-drop
pub async fn move_stage(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<StageRequest>,
) -> Result<HttpResponse, AppError> {
    let target = Stage::parse(body.stage.trim())
        .ok_or_else(|| AppError::Validation(vec![format!("Unknown stage '{}'", body.stage)]))?;
    let owner = acting_owner(&session, store.get_ref()).await?;

    let response = match pipeline::move_deal(store.get_ref(), &owner, path.into_inner(), target).await? {
        StageMove::Unchanged => StageResponse { moved: false, items: None },
        StageMove::Moved { deals } => StageResponse { moved: true, items: Some(deals) },
    };
    Ok(HttpResponse::Ok().json(response))
}
