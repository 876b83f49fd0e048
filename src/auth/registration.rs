//! Account sign-up, with or without a team invitation.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::company::CompanyPayload;
use crate::models::invite::Invite;
use crate::models::user::{NewUser, UserProfile};
use crate::store::{Owner, RecordStore, StoreResult};
use super::password::hash_password;
use super::validate::{validate_email, validate_password, validate_required};

pub const COMPANY_REQUIRED: &str = "Company is required when registering without an invitation";

#[derive(Debug, Clone, PartialEq)]
pub enum InviteLookup {
    NotProvided,
    Pending(Invite),
    /// Unknown token, or one that is no longer pending.
    Invalid,
}

pub async fn lookup_invite(store: &dyn RecordStore, token: Option<&str>) -> StoreResult<InviteLookup> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(InviteLookup::NotProvided);
    };
    Ok(match store.find_invite_by_token(token).await? {
        Some(invite) if invite.is_pending() => InviteLookup::Pending(invite),
        _ => InviteLookup::Invalid,
    })
}

/// Public view of a pending invite for prefilling the register form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePreview {
    pub email: String,
    pub company_name: String,
    pub role: String,
}

pub async fn preview(store: &dyn RecordStore, invite: &Invite) -> StoreResult<InvitePreview> {
    Ok(InvitePreview {
        email: invite.email.clone(),
        company_name: invited_company_name(store, invite).await?,
        role: invite.role.clone(),
    })
}

async fn invited_company_name(store: &dyn RecordStore, invite: &Invite) -> StoreResult<String> {
    Ok(store
        .find_company_name(invite.company)
        .await?
        .unwrap_or_else(|| invite.company.to_string()))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    /// Invite token from `/register?invite=...`.
    pub invite: Option<String>,
    pub csrf_token: String,
}

/// Create an account.
///
/// With a pending invite, email, company and role come from the invite and
/// the invite is marked accepted. Without one, a company name is required and
/// a companies row is created for it when none exists yet.
pub async fn register(store: &dyn RecordStore, form: RegisterForm) -> Result<UserProfile, AppError> {
    let invite = match lookup_invite(store, form.invite.as_deref()).await? {
        InviteLookup::Invalid => return Err(AppError::InvalidInvite),
        InviteLookup::Pending(invite) => Some(invite),
        InviteLookup::NotProvided => None,
    };

    let mut errors: Vec<String> = [
        validate_required(&form.first_name, "First name", 100),
        validate_required(&form.last_name, "Last name", 100),
        validate_password(&form.password),
    ]
    .into_iter()
    .flatten()
    .collect();
    if invite.is_none() {
        errors.extend(validate_email(&form.email));
        if form.company.trim().is_empty() {
            errors.push(COMPANY_REQUIRED.to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let (email, company, role) = match &invite {
        Some(invite) => (
            invite.email.clone(),
            invited_company_name(store, invite).await?,
            invite.role.clone(),
        ),
        None => (form.email.trim().to_string(), form.company.trim().to_string(), "member".to_string()),
    };

    let profile = store
        .create_user(&NewUser {
            email,
            password_hash: hash_password(&form.password)?,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            company: Some(company.clone()),
            role,
        })
        .await?;

    match invite {
        Some(invite) => {
            if !store.mark_invite_accepted(&invite.token).await? {
                log::warn!("Invite {} was no longer pending when accepted", invite.id);
            }
        }
        None => {
            if store.find_company_id_by_name(&company).await?.is_none() {
                let owner = Owner { user_id: profile.id, company: Some(company.clone()) };
                store.insert_company(&owner, &CompanyPayload::named(&company)).await?;
                log::info!("Created company '{company}' for new user {}", profile.id);
            }
        }
    }

    Ok(profile)
}
