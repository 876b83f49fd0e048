/// Team listing, profile edits and the invite-to-register round trip.

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use serde_json::{Value, json};

#[macro_use]
mod common;
use common::{APP_URL, TestContext, api};

fn invite_token(ctx: &TestContext, email: &str) -> String {
    ctx.store
        .invites()
        .into_iter()
        .find(|i| i.email == email)
        .map(|i| i.token)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Invites
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_invite_round_trip_into_registration() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let founder = register!(app, "founder@acme.test", "Acme Corp");

    let req = api(Method::POST, "/api/invite", &founder)
        .set_json(json!({ "email": "hire@acme.test", "role": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invite: Value = test::read_body_json(resp).await;
    assert_eq!(invite["status"], "pending");
    assert!(invite.get("token").is_none());

    let token = invite_token(&ctx, "hire@acme.test");
    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "hire@acme.test");
    assert!(sent[0].html.contains(&format!("{APP_URL}/register?invite={token}")));

    // Public preview
    let req = test::TestRequest::get().uri(&format!("/api/invites/{token}")).to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        preview,
        json!({ "email": "hire@acme.test", "companyName": "Acme Corp", "role": "admin" })
    );

    // Register with the invite; email and company come from the invite
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "typo@elsewhere.test",
            "password": common::PASSWORD,
            "firstName": "New",
            "lastName": "Hire",
            "company": "Somewhere Else",
            "invite": token,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["email"], "hire@acme.test");
    assert_eq!(profile["company"], "Acme Corp");
    assert_eq!(profile["role"], "admin");
    assert_eq!(ctx.store.invites()[0].status, "accepted");

    // The team now has both members
    let req = api(Method::GET, "/api/team", &founder).to_request();
    let team: Value = test::call_and_read_body_json(&app, req).await;
    let mut emails: Vec<&str> = team.as_array().unwrap().iter().map(|m| m["email"].as_str().unwrap()).collect();
    emails.sort_unstable();
    assert_eq!(emails, vec!["founder@acme.test", "hire@acme.test"]);
}

#[actix_web::test]
async fn test_used_or_unknown_invite_is_rejected() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let founder = register!(app, "boss@acme.test", "Acme Corp");

    let req = api(Method::POST, "/api/invite", &founder)
        .set_json(json!({ "email": "once@acme.test" }))
        .to_request();
    test::call_service(&app, req).await;
    let token = invite_token(&ctx, "once@acme.test");

    let body = |invite: &str| {
        json!({
            "email": "once@acme.test",
            "password": common::PASSWORD,
            "firstName": "Only",
            "lastName": "Once",
            "invite": invite,
        })
    };
    let req = test::TestRequest::post().uri("/api/auth/register").set_json(body(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/auth/register").set_json(body(&token)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], crm::errors::INVALID_INVITE);

    let req = test::TestRequest::get().uri(&format!("/api/invites/{token}")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/invites/not-a-real-token").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_pending_invites_lists_only_open_ones_for_the_company() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let founder = register!(app, "lead@acme.test", "Acme Corp");
    let rival = register!(app, "lead@globex.test", "Globex");

    for email in ["first@acme.test", "second@acme.test"] {
        let req = api(Method::POST, "/api/invite", &founder)
            .set_json(json!({ "email": email }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "email": "first@acme.test",
            "password": common::PASSWORD,
            "firstName": "First",
            "lastName": "Hire",
            "invite": invite_token(&ctx, "first@acme.test"),
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = api(Method::GET, "/api/invites", &founder).to_request();
    let pending: Value = test::call_and_read_body_json(&app, req).await;
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["email"], "second@acme.test");
    assert_eq!(pending[0]["status"], "pending");
    assert!(pending[0].get("token").is_none());

    let req = api(Method::GET, "/api/invites", &rival).to_request();
    let pending: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(pending, json!([]));
}

#[actix_web::test]
async fn test_pending_invites_without_company_is_refused() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    ctx.seed_user("nomad@nowhere.test", None).await;
    let cookie = login!(app, "nomad@nowhere.test");

    let req = api(Method::GET, "/api/invites", &cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "No company found");
}

#[actix_web::test]
async fn test_invite_survives_mail_failure() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let founder = register!(app, "mailfail@acme.test", "Acme Corp");
    ctx.mailer.fail_with("connection refused");

    let req = api(Method::POST, "/api/invite", &founder)
        .set_json(json!({ "email": "lost@acme.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "Failed to send email: connection refused");

    let invites = ctx.store.invites();
    assert_eq!(invites.len(), 1);
    assert_eq!(invites[0].status, "pending");
}

#[actix_web::test]
async fn test_invite_rejects_bad_email_before_writing() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let founder = register!(app, "strict@acme.test", "Acme Corp");

    let req = api(Method::POST, "/api/invite", &founder)
        .set_json(json!({ "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.invites().is_empty());
    assert!(ctx.mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_invite_without_company_is_refused() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    ctx.seed_user("loner@nowhere.test", None).await;
    let cookie = login!(app, "loner@nowhere.test");

    let req = api(Method::POST, "/api/invite", &cookie)
        .set_json(json!({ "email": "friend@nowhere.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["error"], "No company found");
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_me_reads_and_renames() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "me@acme.test", "Acme Corp");

    let req = api(Method::GET, "/api/me", &cookie).to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["first_name"], "Jane");
    assert_eq!(me["company"], "Acme Corp");

    let req = api(Method::PUT, "/api/me", &cookie)
        .set_json(json!({ "firstName": " Janet ", "lastName": "Dough" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["first_name"], "Janet");
    assert_eq!(updated["last_name"], "Dough");

    let req = api(Method::PUT, "/api/me", &cookie)
        .set_json(json!({ "firstName": "", "lastName": "Dough" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
