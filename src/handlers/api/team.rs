use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::context::{ProfilePolicy, SessionContext};
use crate::auth::session::get_user_id;
use crate::auth::validate::validate_required;
use crate::config::Config;
use crate::errors::AppError;
use crate::mail::Mailer;
use crate::models::invite::InviteRequest;
use crate::models::user::ProfileForm;
use crate::store::RecordStore;
use crate::team;

/// GET /api/team - users sharing the caller's company
pub async fn list(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let ctx = SessionContext::load(&session, store.get_ref()).await?;
    let members = team::members(store.get_ref(), &ctx).await?;
    Ok(HttpResponse::Ok().json(members))
}

/// GET /api/me - waits briefly for a freshly created profile to get its names
pub async fn me(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let mut ctx = SessionContext::new();
    ctx.resolve(store.get_ref(), get_user_id(&session), ProfilePolicy::POLLING).await?;
    let user = ctx.require_user()?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /api/me - first and last name only
pub async fn update_me(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    let errors: Vec<String> = [
        validate_required(&body.first_name, "First name", 100),
        validate_required(&body.last_name, "Last name", 100),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let ctx = SessionContext::load(&session, store.get_ref()).await?;
    let user = ctx.require_user()?;
    let updated = store
        .update_profile_names(user.id, body.first_name.trim(), body.last_name.trim())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/invites - the company's pending invites
pub async fn pending_invites(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let ctx = SessionContext::load(&session, store.get_ref()).await?;
    let invites = team::pending_invites(store.get_ref(), &ctx).await?;
    Ok(HttpResponse::Ok().json(invites))
}

/// POST /api/invite - store a pending invite and email its link
pub async fn invite(
    store: web::Data<dyn RecordStore>,
    mailer: web::Data<dyn Mailer>,
    config: web::Data<Config>,
    session: Session,
    body: web::Json<InviteRequest>,
) -> Result<HttpResponse, AppError> {
    let ctx = SessionContext::load(&session, store.get_ref()).await?;
    let invite = team::invite_member(store.get_ref(), mailer.get_ref(), &config, &ctx, &body).await?;
    Ok(HttpResponse::Created().json(invite))
}
