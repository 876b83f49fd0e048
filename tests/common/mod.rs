//! Shared test infrastructure for HTTP-level tests.
//!
//! Every test drives the real route table against a fresh `MemoryStore`, a
//! recording mailer and a scripted chat client. Nothing touches a database or
//! the network.
//!
//! # Setup
//! - `TestContext::new()` - fresh store and doubles
//! - `test_app!(ctx)` - initialized actix service over `ctx.services`
//! - `register!(app, email, company)` - sign up through the API, returns the session cookie
//! - `login!(app, email)` - sign in an existing user, returns the session cookie

#![allow(dead_code, unused_macros)]

use std::sync::{Arc, Mutex};

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{Method, header::ContentType};
use actix_web::test::TestRequest;
use async_trait::async_trait;

use crm::Services;
use crm::assistant::{ChatCompletion, ChatMessage, CompletionError};
use crm::auth::password::hash_password;
use crm::config::Config;
use crm::mail::{Mailer, OutgoingEmail};
use crm::models::user::{NewUser, UserProfile};
use crm::store::{MemoryStore, RecordStore};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const PASSWORD: &str = "correct-horse-battery";
pub const APP_URL: &str = "http://crm.test";

// ============================================================================
// DOUBLES
// ============================================================================

/// Mailer that records every message, or fails with a fixed error.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    failure: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), String> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(message);
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum ChatScript {
    Reply(String),
    NoChoice,
    Upstream(String),
}

/// Chat client that answers from a script and records every request.
pub struct ScriptedChat {
    script: Mutex<ChatScript>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChat {
    pub fn new(script: ChatScript) -> Self {
        Self { script: Mutex::new(script), calls: Mutex::new(Vec::new()) }
    }

    pub fn set(&self, script: ChatScript) {
        *self.script.lock().unwrap() = script;
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<Option<String>, CompletionError> {
        self.calls.lock().unwrap().push(messages);
        match self.script.lock().unwrap().clone() {
            ChatScript::Reply(text) => Ok(Some(text)),
            ChatScript::NoChoice => Ok(None),
            ChatScript::Upstream(body) => Err(CompletionError::Upstream(body)),
        }
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub chat: Arc<ScriptedChat>,
    pub services: Services,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let chat = Arc::new(ScriptedChat::new(ChatScript::Reply("You have one deal.".into())));
        let services = Services {
            store: store.clone(),
            mailer: mailer.clone(),
            chat: chat.clone(),
            config: Config { app_url: APP_URL.to_string(), ..Config::default() },
        };
        Self { store, mailer, chat, services }
    }

    /// Insert a user directly, bypassing registration.
    pub async fn seed_user(&self, email: &str, company: Option<&str>) -> UserProfile {
        self.store
            .create_user(&NewUser {
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).expect("hash"),
                first_name: "Sam".into(),
                last_name: "Seeded".into(),
                company: company.map(String::from),
                role: "member".into(),
            })
            .await
            .expect("seed user")
    }
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

/// JSON API request carrying the session cookie.
pub fn api(method: Method, uri: &str, cookie: &Cookie<'static>) -> TestRequest {
    TestRequest::default()
        .method(method)
        .uri(uri)
        .cookie(cookie.clone())
        .insert_header(ContentType::json())
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned()
}

macro_rules! test_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(crm::session_middleware(actix_web::cookie::Key::generate()))
                .configure(move |cfg| crm::handlers::configure(cfg, &services))
                .default_service(actix_web::web::to(crm::handlers::not_found)),
        )
        .await
    }};
}

macro_rules! register {
    ($app:expr, $email:expr, $company:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "email": $email,
                "password": common::PASSWORD,
                "firstName": "Jane",
                "lastName": "Doe",
                "company": $company,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED, "registration failed");
        common::session_cookie(&resp)
    }};
}

macro_rules! login {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({ "email": $email, "password": common::PASSWORD }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "login failed");
        common::session_cookie(&resp)
    }};
}
