pub mod api;
pub mod auth_handlers;
pub mod dashboard;
pub mod deal_handlers;

use actix_web::{HttpResponse, middleware::from_fn, web};

use crate::Services;
use crate::auth::middleware::{require_api_auth, require_auth, require_json_content_type};

/// Register shared services and every route. Used by `main` and by the
/// integration tests so both serve the same route table.
pub fn configure(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::from(services.store.clone()))
        .app_data(web::Data::from(services.mailer.clone()))
        .app_data(web::Data::from(services.chat.clone()))
        .app_data(web::Data::new(services.config.clone()));

    // Public pages
    cfg.route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/register", web::get().to(auth_handlers::register_page))
        .route("/register", web::post().to(auth_handlers::register_submit))
        .route("/logout", web::post().to(auth_handlers::logout))
        .route("/", web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish()
        }));

    // Public API: must be registered before the protected /api scope
    cfg.service(
        web::scope("/api/auth")
            .wrap(from_fn(require_json_content_type))
            .route("/login", web::post().to(auth_handlers::api_login))
            .route("/logout", web::post().to(auth_handlers::api_logout))
            .route("/register", web::post().to(auth_handlers::api_register)),
    )
    .route("/api/invites/{token}", web::get().to(auth_handlers::invite_preview));

    // Protected API
    cfg.service(
        web::scope("/api")
            .wrap(from_fn(require_json_content_type))
            .wrap(from_fn(require_api_auth))
            .configure(api::configure),
    );

    // Protected pages
    cfg.service(
        web::scope("")
            .wrap(from_fn(require_auth))
            .route("/dashboard", web::get().to(dashboard::index))
            .route("/deals", web::get().to(deal_handlers::board))
            .route("/deals/{id}/stage", web::post().to(deal_handlers::move_stage)),
    );
}

/// Fallback for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../templates/errors/404.html"))
}
