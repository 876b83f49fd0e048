use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;

use crate::auth::context::SessionContext;
use crate::errors::{AppError, ErrorBody};
use crate::models::dashboard::{self, Section};
use crate::store::RecordStore;
use crate::team::NO_COMPANY;

async fn company(session: &Session, store: &dyn RecordStore) -> Result<String, AppError> {
    let ctx = SessionContext::load(session, store).await?;
    Ok(ctx.require_company(NO_COMPANY)?.to_string())
}

/// A single section: its data, or 500 with the section's own message.
fn section_response<T: Serialize>(section: Section<T>) -> HttpResponse {
    match section {
        Section::Data(data) => HttpResponse::Ok().json(data),
        Section::Error(error) => HttpResponse::InternalServerError().json(ErrorBody { error, details: Vec::new() }),
    }
}

/// GET /api/dashboard - all four sections, each with its own data or error
pub async fn all(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let company = company(&session, store.get_ref()).await?;
    let dashboard = dashboard::load(store.get_ref(), &company, Utc::now()).await;
    Ok(HttpResponse::Ok().json(dashboard))
}

pub async fn overview(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let company = company(&session, store.get_ref()).await?;
    let result = dashboard::overview(store.get_ref(), &company, Utc::now().date_naive()).await;
    Ok(section_response(Section::from_result(result, dashboard::OVERVIEW_ERROR)))
}

pub async fn pipeline(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let company = company(&session, store.get_ref()).await?;
    let result = dashboard::pipeline_distribution(store.get_ref(), &company).await;
    Ok(section_response(Section::from_result(result, dashboard::PIPELINE_ERROR)))
}

pub async fn revenue(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let company = company(&session, store.get_ref()).await?;
    let result = dashboard::revenue_trend(store.get_ref(), &company).await;
    Ok(section_response(Section::from_result(result, dashboard::REVENUE_ERROR)))
}

pub async fn activity(store: web::Data<dyn RecordStore>, session: Session) -> Result<HttpResponse, AppError> {
    let company = company(&session, store.get_ref()).await?;
    let result = dashboard::recent_activity(store.get_ref(), &company, Utc::now()).await;
    Ok(section_response(Section::from_result(result, dashboard::ACTIVITY_ERROR)))
}
