use std::sync::Arc;

use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use crm::assistant::CompletionClient;
use crm::config::{Config, StoreBackend};
use crm::mail::SmtpMailer;
use crm::store::{MemoryStore, PgStore, RecordStore};
use crm::{Services, db, handlers};

async fn open_store(config: &Config) -> std::io::Result<Arc<dyn RecordStore>> {
    match config.store {
        StoreBackend::Postgres => {
            let pool = db::init_pool(&config.database_url)
                .await
                .map_err(std::io::Error::other)?;
            db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            log::warn!("Using in-memory store: all data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = open_store(&config).await?;
    let chat = CompletionClient::new(config.llm.clone(), config.http_timeout).map_err(std::io::Error::other)?;
    if config.llm.api_key.is_empty() {
        log::warn!("LLM_API_KEY not set, the assistant will fail upstream");
    }
    let services = Services {
        store,
        mailer: Arc::new(SmtpMailer::new(config.smtp.clone())),
        chat: Arc::new(chat),
        config: config.clone(),
    };

    // Session encryption key: load from SESSION_KEY for sessions that survive restarts
    let secret_key = match &config.session_key {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(crm::session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(|cfg| handlers::configure(cfg, &services))
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
