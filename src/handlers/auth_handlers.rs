use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::registration::{self, InviteLookup, RegisterForm};
use crate::auth::{csrf, password, session};
use crate::errors::{AppError, render};
use crate::models::user::UserProfile;
use crate::store::RecordStore;
use crate::templates_structs::{APP_NAME, LoginTemplate, RegisterTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct InviteQuery {
    pub invite: Option<String>,
}

/// Look up the account and check its password. Unknown email and wrong
/// password are indistinguishable to the caller.
async fn check_credentials(store: &dyn RecordStore, email: &str, password: &str) -> Result<UserProfile, AppError> {
    let creds = store
        .find_credentials(email.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;
    if !password::verify_password(password, &creds.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }
    store.find_profile(creds.id).await?.ok_or(AppError::InvalidCredentials)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther().insert_header(("Location", location)).finish()
}

// ---------- HTML ----------

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if session::get_user_id(&session).is_some() {
        return Ok(redirect("/dashboard"));
    }
    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate { error: None, app_name: APP_NAME.to_string(), csrf_token, email: String::new() })
}

pub async fn login_submit(
    store: web::Data<dyn RecordStore>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match check_credentials(store.get_ref(), &form.email, &form.password).await {
        Ok(profile) => {
            session::sign_in(&session, profile.id)?;
            log::info!("User {} signed in", profile.id);
            Ok(redirect("/dashboard"))
        }
        Err(AppError::InvalidCredentials) => {
            let csrf_token = csrf::get_or_create_token(&session);
            render(LoginTemplate {
                error: Some(AppError::InvalidCredentials.to_string()),
                app_name: APP_NAME.to_string(),
                csrf_token,
                email: form.email.clone(),
            })
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session::sign_out(&session);
    Ok(redirect("/login"))
}

/// GET /register?invite=<token>
///
/// A pending invite prefills and locks email and company. An unknown or used
/// token shows the invalid-invite message instead of the normal form.
pub async fn register_page(
    store: web::Data<dyn RecordStore>,
    session: Session,
    query: web::Query<InviteQuery>,
) -> Result<HttpResponse, AppError> {
    let csrf_token = csrf::get_or_create_token(&session);
    let mut tmpl = RegisterTemplate {
        app_name: APP_NAME.to_string(),
        csrf_token,
        errors: Vec::new(),
        invite_token: None,
        invite: None,
        email: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        company: String::new(),
    };

    match registration::lookup_invite(store.get_ref(), query.invite.as_deref()).await? {
        InviteLookup::NotProvided => {}
        InviteLookup::Invalid => tmpl.errors.push(AppError::InvalidInvite.to_string()),
        InviteLookup::Pending(invite) => {
            let preview = registration::preview(store.get_ref(), &invite).await?;
            tmpl.email = preview.email.clone();
            tmpl.company = preview.company_name.clone();
            tmpl.invite_token = Some(invite.token);
            tmpl.invite = Some(preview);
        }
    }
    render(tmpl)
}

pub async fn register_submit(
    store: web::Data<dyn RecordStore>,
    session: Session,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = match registration::register(store.get_ref(), form.clone()).await {
        Ok(profile) => {
            session::sign_in(&session, profile.id)?;
            session::set_flash(&session, "Welcome aboard!");
            return Ok(redirect("/dashboard"));
        }
        Err(AppError::Validation(errors)) => errors,
        Err(AppError::InvalidInvite) => vec![AppError::InvalidInvite.to_string()],
        Err(e) => return Err(e),
    };

    // Re-render with what the user typed; invite fields stay locked.
    let invite = match registration::lookup_invite(store.get_ref(), form.invite.as_deref()).await? {
        InviteLookup::Pending(invite) => Some(registration::preview(store.get_ref(), &invite).await?),
        _ => None,
    };
    let (email, company) = match &invite {
        Some(p) => (p.email.clone(), p.company_name.clone()),
        None => (form.email, form.company),
    };
    render(RegisterTemplate {
        app_name: APP_NAME.to_string(),
        csrf_token: csrf::get_or_create_token(&session),
        errors,
        invite_token: invite.as_ref().and(form.invite),
        invite,
        email,
        first_name: form.first_name,
        last_name: form.last_name,
        company,
    })
}

// ---------- JSON API ----------

/// POST /api/auth/login
pub async fn api_login(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let profile = check_credentials(store.get_ref(), &body.email, &body.password).await?;
    session::sign_in(&session, profile.id)?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/auth/logout
pub async fn api_logout(session: Session) -> HttpResponse {
    session::sign_out(&session);
    HttpResponse::NoContent().finish()
}

/// POST /api/auth/register - create the account and sign it in
pub async fn api_register(
    store: web::Data<dyn RecordStore>,
    session: Session,
    body: web::Json<RegisterForm>,
) -> Result<HttpResponse, AppError> {
    let profile = registration::register(store.get_ref(), body.into_inner()).await?;
    session::sign_in(&session, profile.id)?;
    Ok(HttpResponse::Created().json(profile))
}

/// GET /api/invites/{token} - pending invites only
pub async fn invite_preview(
    store: web::Data<dyn RecordStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();
    match registration::lookup_invite(store.get_ref(), Some(&token)).await? {
        InviteLookup::Pending(invite) => {
            let preview = registration::preview(store.get_ref(), &invite).await?;
            Ok(HttpResponse::Ok().json(preview))
        }
        _ => Err(AppError::InvalidInvite),
    }
}
