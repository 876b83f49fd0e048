pub mod assistant;
pub mod companies;
pub mod contacts;
pub mod dashboard;
pub mod deals;
pub mod leads;
pub mod tasks;
pub mod team;

use actix_session::Session;
use actix_web::web;
use serde::Serialize;

use crate::auth::context::SessionContext;
use crate::errors::AppError;
use crate::store::{Owner, RecordStore};

/// Write response: the written record plus the owner's refreshed list.
#[derive(Serialize)]
pub struct Refreshed<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    pub items: Vec<T>,
}

impl<T: Serialize> Refreshed<T> {
    pub fn new(item: T, items: Vec<T>) -> Self {
        Self { item: Some(item), items }
    }

    pub fn list(items: Vec<T>) -> Self {
        Self { item: None, items }
    }
}

/// The signed-in user as the owner of writes.
pub(crate) async fn acting_owner(session: &Session, store: &dyn RecordStore) -> Result<Owner, AppError> {
    SessionContext::load(session, store).await?.owner()
}

/// Configure the protected `/api` routes. Auth and content-type guards are
/// applied by the enclosing scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/pipeline", web::get().to(deals::pipeline))
        .route("/deals", web::get().to(deals::list))
        .route("/deals", web::post().to(deals::create))
        .route("/deals/{id}", web::put().to(deals::update))
        .route("/deals/{id}", web::delete().to(deals::delete))
        .route("/deals/{id}/stage", web::post().to(deals::move_stage));

    cfg.route("/contacts", web::get().to(contacts::list))
        .route("/contacts", web::post().to(contacts::create))
        .route("/contacts/{id}", web::put().to(contacts::update))
        .route("/contacts/{id}", web::delete().to(contacts::delete));

    cfg.route("/leads", web::get().to(leads::list))
        .route("/leads", web::post().to(leads::create))
        .route("/leads/{id}", web::put().to(leads::update))
        .route("/leads/{id}", web::delete().to(leads::delete));

    cfg.route("/companies", web::get().to(companies::list))
        .route("/companies", web::post().to(companies::create))
        .route("/companies/{id}", web::put().to(companies::update))
        .route("/companies/{id}", web::delete().to(companies::delete));

    // /tasks/stats BEFORE /tasks/{id}
    cfg.route("/tasks", web::get().to(tasks::list))
        .route("/tasks", web::post().to(tasks::create))
        .route("/tasks/stats", web::get().to(tasks::stats))
        .route("/tasks/{id}", web::put().to(tasks::update))
        .route("/tasks/{id}", web::delete().to(tasks::delete))
        .route("/tasks/{id}/toggle", web::post().to(tasks::toggle));

    cfg.route("/dashboard", web::get().to(dashboard::all))
        .route("/dashboard/overview", web::get().to(dashboard::overview))
        .route("/dashboard/pipeline", web::get().to(dashboard::pipeline))
        .route("/dashboard/revenue", web::get().to(dashboard::revenue))
        .route("/dashboard/activity", web::get().to(dashboard::activity));

    cfg.route("/team", web::get().to(team::list))
        .route("/me", web::get().to(team::me))
        .route("/me", web::put().to(team::update_me))
        .route("/invite", web::post().to(team::invite))
        .route("/invites", web::get().to(team::pending_invites));

    cfg.route("/ai-assistant", web::post().to(assistant::chat));
}
