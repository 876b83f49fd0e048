use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::assistant::{self, ChatCompletion, ChatReply, ChatRequest};
use crate::auth::context::SessionContext;
use crate::errors::AppError;
use crate::store::RecordStore;

/// POST /api/ai-assistant
///
/// Unauthenticated callers never get here (the /api scope answers 401).
pub async fn chat(
    store: web::Data<dyn RecordStore>,
    chat: web::Data<dyn ChatCompletion>,
    session: Session,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = SessionContext::load(&session, store.get_ref()).await?;
    let company = ctx.require_company(assistant::NO_COMPANY)?;

    let message = assistant::answer(store.get_ref(), chat.get_ref(), company, &body).await?;
    Ok(HttpResponse::Ok().json(ChatReply { message }))
}
