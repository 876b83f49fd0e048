use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::context::SessionContext;
use crate::auth::{csrf, session};
use crate::errors::{AppError, render};
use crate::models::deal::Stage;
use crate::pipeline::{self, StageMove};
use crate::store::RecordStore;
use crate::templates_structs::{BoardTemplate, PageContext};

#[derive(Deserialize)]
pub struct MoveForm {
    pub stage: String,
    pub csrf_token: String,
}

fn back_to_board() -> HttpResponse {
    HttpResponse::SeeOther().insert_header(("Location", "/deals")).finish()
}

/// GET /deals - kanban board
pub async fn board(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let session_ctx = SessionContext::load(&session, store.get_ref()).await?;
    let owner = session_ctx.owner()?;
    let ctx = PageContext::build(&session, &session_ctx, "/deals")?;
    let board = pipeline::load_board(store.get_ref(), owner.user_id).await?;
    render(BoardTemplate::new(ctx, board))
}

/// POST /deals/{id}/stage - "move to" form on a card
///
/// A rejected write is reported through the flash message; the board is then
/// re-rendered from storage, so the card stays where it was.
pub async fn move_stage(
    store: web::Data<dyn RecordStore>,
    session: Session,
    path: web::Path<Uuid>,
    form: web::Form<MoveForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some(target) = Stage::parse(&form.stage) else {
        session::set_flash(&session, &format!("Unknown stage '{}'", form.stage));
        return Ok(back_to_board());
    };
    let owner = SessionContext::load(&session, store.get_ref()).await?.owner()?;

    match pipeline::move_deal(store.get_ref(), &owner, path.into_inner(), target).await {
        Ok(StageMove::Unchanged) => {}
        Ok(StageMove::Moved { .. }) => session::set_flash(&session, &format!("Deal moved to {}", target.title())),
        Err(AppError::NotFound) => session::set_flash(&session, "Deal not found"),
        Err(AppError::Store(e)) => {
            log::warn!("Stage move rejected: {e}");
            session::set_flash(&session, &format!("Failed to move deal: {e}"));
        }
        Err(e) => return Err(e),
    }
    Ok(back_to_board())
}
