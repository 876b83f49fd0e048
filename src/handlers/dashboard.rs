use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike, Utc};

use crate::auth::context::SessionContext;
use crate::errors::{AppError, render};
use crate::models::dashboard::{self, Dashboard};
use crate::store::RecordStore;
use crate::team::NO_COMPANY;
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(name: &str) -> String {
    let period = match Local::now().hour() {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

pub async fn index(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let session_ctx = SessionContext::load(&session, store.get_ref()).await?;
    let ctx = PageContext::build(&session, &session_ctx, "/dashboard")?;

    let dashboard = match session_ctx.require_company(NO_COMPANY) {
        Ok(company) => dashboard::load(store.get_ref(), company, Utc::now()).await,
        Err(_) => Dashboard::unavailable(NO_COMPANY),
    };

    let greeting = time_greeting(&ctx.user_name);
    render(DashboardTemplate { ctx, greeting, dashboard })
}
