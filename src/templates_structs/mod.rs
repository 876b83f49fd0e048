// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::context::SessionContext;
use crate::auth::csrf;
use crate::auth::session::take_flash;
use crate::errors::AppError;

pub const APP_NAME: &str = "Pipeline CRM";

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.user_name`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub app_name: String,
    pub user_name: String,
    pub avatar_initials: String,
    pub company: String,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, ctx: &SessionContext, current_path: &str) -> Result<Self, AppError> {
        let user = ctx.require_user()?;
        let user_name = user.display_name();
        Ok(Self {
            app_name: APP_NAME.to_string(),
            avatar_initials: crate::models::dashboard::initials(&user_name),
            user_name,
            company: user.company.clone().unwrap_or_default(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        })
    }

    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }
}

mod auth;
mod dashboard;
mod deals;

pub use auth::*;
pub use dashboard::*;
pub use deals::*;
