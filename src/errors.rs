use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

pub const INVALID_INVITE: &str = "The invitation link is invalid or has already been used.";

#[derive(Debug)]
pub enum AppError {
    Unauthenticated,
    InvalidCredentials,
    /// Required data missing from the caller's profile, e.g. no company.
    MissingPrerequisite(String),
    Validation(Vec<String>),
    InvalidInvite,
    NotFound,
    Store(StoreError),
    Upstream(String),
    Mail(String),
    Template(askama::Error),
    Hash(String),
    Session(String),
    Csrf,
}

/// JSON body for every error response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthenticated => write!(f, "Not authenticated"),
            AppError::InvalidCredentials => write!(f, "Invalid email or password"),
            AppError::MissingPrerequisite(msg) => write!(f, "{msg}"),
            AppError::Validation(_) => write!(f, "Validation failed"),
            AppError::InvalidInvite => write!(f, "{INVALID_INVITE}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Store(e) => write!(f, "{e}"),
            AppError::Upstream(msg) => write!(f, "{msg}"),
            AppError::Mail(msg) => write!(f, "{msg}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::MissingPrerequisite(_) | AppError::Validation(_) | AppError::InvalidInvite => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Csrf => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        }
        let details = match self {
            AppError::Validation(errors) => errors.clone(),
            _ => Vec::new(),
        };
        HttpResponse::build(status).json(ErrorBody { error: self.to_string(), details })
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(StoreError::Db(e))
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
