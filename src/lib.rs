pub mod assistant;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod team;
pub mod templates_structs;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use assistant::ChatCompletion;
use config::Config;
use mail::Mailer;
use store::RecordStore;

/// Everything a request handler may reach, shared by all workers.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn RecordStore>,
    pub mailer: Arc<dyn Mailer>,
    pub chat: Arc<dyn ChatCompletion>,
    pub config: Config,
}

/// Cookie session layer. `secure` is off so the app also works over plain HTTP on localhost.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}
