//! Team membership: listing colleagues and inviting new ones by email.

use crate::auth::context::SessionContext;
use crate::auth::validate::validate_email;
use crate::config::Config;
use crate::errors::AppError;
use crate::mail::{Mailer, OutgoingEmail};
use crate::models::company::resolve_company_id;
use crate::models::invite::{Invite, InviteRequest, NewInvite};
use crate::models::user::UserProfile;
use crate::store::RecordStore;

pub const NO_COMPANY: &str = "No company found";
pub const COMPANY_NOT_FOUND: &str = "Company not found";

/// Users sharing the caller's company scalar.
pub async fn members(store: &dyn RecordStore, ctx: &SessionContext) -> Result<Vec<UserProfile>, AppError> {
    let company = ctx.require_company(NO_COMPANY)?;
    Ok(store.find_members(company).await?)
}

/// Invites still waiting to be redeemed in the caller's company.
pub async fn pending_invites(store: &dyn RecordStore, ctx: &SessionContext) -> Result<Vec<Invite>, AppError> {
    let raw_company = ctx.require_company(NO_COMPANY)?;
    let company = resolve_company_id(store, raw_company)
        .await?
        .id()
        .ok_or_else(|| AppError::MissingPrerequisite(COMPANY_NOT_FOUND.to_string()))?;
    Ok(store.pending_invites(company).await?)
}

/// Persist a pending invite, then email its registration link.
///
/// The invite row is written before the email goes out and is kept when
/// delivery fails; the caller sees the mail error.
pub async fn invite_member(
    store: &dyn RecordStore,
    mailer: &dyn Mailer,
    config: &Config,
    ctx: &SessionContext,
    request: &InviteRequest,
) -> Result<Invite, AppError> {
    let user = ctx.require_user()?;
    let raw_company = ctx.require_company(NO_COMPANY)?;
    if let Some(msg) = validate_email(&request.email) {
        return Err(AppError::Validation(vec![msg]));
    }

    let company = resolve_company_id(store, raw_company)
        .await?
        .id()
        .ok_or_else(|| AppError::MissingPrerequisite(COMPANY_NOT_FOUND.to_string()))?;

    let new = NewInvite::issue(&request.email, company, request.role(), user.id);
    let invite = store.insert_invite(&new).await?;

    let url = config.invite_url(&invite.token);
    mailer
        .send(OutgoingEmail::invitation(&invite.email, &url))
        .await
        .map_err(|e| AppError::Mail(format!("Failed to send email: {e}")))?;

    log::info!("Invited {} to company {company}", invite.email);
    Ok(invite)
}
