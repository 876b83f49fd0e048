/// Contacts, leads, companies and tasks over HTTP: writes answer with the
/// owner's refreshed list, other owners' rows are invisible, bad forms never
/// reach the store.

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

#[macro_use]
mod common;
use common::{TestContext, api};

fn ids(list: &Value) -> Vec<&str> {
    list.as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect()
}

// ---------------------------------------------------------------------------
// Create, update, delete
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_each_entity_round_trips_with_refreshed_list() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "crud@acme.test", "Acme Corp");

    let cases = [
        (
            "/api/contacts",
            json!({ "firstName": "Ada", "lastName": "King", "email": "ada@client.test" }),
            json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@client.test" }),
            "last_name",
            "Lovelace",
        ),
        (
            "/api/leads",
            json!({ "firstName": "Lee", "lastName": "Smith" }),
            json!({ "firstName": "Lee", "lastName": "Smith", "status": "qualified" }),
            "status",
            "qualified",
        ),
        (
            "/api/companies",
            json!({ "name": "Initech" }),
            json!({ "name": "Initech", "industry": "Software" }),
            "industry",
            "Software",
        ),
        (
            "/api/tasks",
            json!({ "title": "Call back", "dueDate": "2030-01-15" }),
            json!({ "title": "Call back", "dueDate": "2030-01-15", "priority": "high" }),
            "priority",
            "high",
        ),
    ];

    for (uri, create, update, field, expected) in cases {
        let req = api(Method::POST, uri, &cookie).set_json(&create).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "{uri}");
        let created: Value = test::read_body_json(resp).await;
        let id = created["item"]["id"].as_str().unwrap().to_string();
        assert!(ids(&created["items"]).contains(&id.as_str()), "{uri}");
        let listed = created["items"].as_array().unwrap().len();

        let req = api(Method::PUT, &format!("{uri}/{id}"), &cookie).set_json(&update).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let updated: Value = test::read_body_json(resp).await;
        assert_eq!(updated["item"][field], expected, "{uri}");
        let row = updated["items"].as_array().unwrap().iter().find(|r| r["id"] == id.as_str()).unwrap();
        assert_eq!(row[field], expected, "{uri}");

        let req = api(Method::DELETE, &format!("{uri}/{id}"), &cookie).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let deleted: Value = test::read_body_json(resp).await;
        assert!(deleted.get("item").is_none(), "{uri}");
        assert_eq!(deleted["items"].as_array().unwrap().len(), listed - 1, "{uri}");
        assert!(!ids(&deleted["items"]).contains(&id.as_str()), "{uri}");
    }
}

#[actix_web::test]
async fn test_other_owners_rows_are_not_found() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let alice = register!(app, "alice@acme.test", "Acme Corp");
    let bob = register!(app, "bob@acme.test", "Acme Corp");

    let cases = [
        ("/api/contacts", json!({ "firstName": "Ada", "lastName": "King", "email": "ada@client.test" })),
        ("/api/leads", json!({ "firstName": "Lee", "lastName": "Smith" })),
        ("/api/companies", json!({ "name": "Initech" })),
        ("/api/tasks", json!({ "title": "Call back", "dueDate": "2030-01-15" })),
    ];

    for (uri, body) in cases {
        let req = api(Method::POST, uri, &alice).set_json(&body).to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["item"]["id"].as_str().unwrap().to_string();

        let req = api(Method::PUT, &format!("{uri}/{id}"), &bob).set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND, "{uri}");
        let req = api(Method::DELETE, &format!("{uri}/{id}"), &bob).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND, "{uri}");

        // Bob never sees the row, Alice still has it
        let req = api(Method::GET, uri, &bob).to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert!(!ids(&list).contains(&id.as_str()), "{uri}");
        let req = api(Method::GET, uri, &alice).to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert!(ids(&list).contains(&id.as_str()), "{uri}");
    }

    let req = api(Method::POST, "/api/tasks/00000000-0000-4000-8000-000000000000/toggle", &bob).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_forms_never_reach_the_store() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "strict@acme.test", "Acme Corp");

    let cases = [
        ("/api/contacts", json!({ "firstName": "Ada", "lastName": "" }), vec!["Last name is required", "Email is required"]),
        ("/api/leads", json!({ "firstName": " ", "lastName": "Smith" }), vec!["First name is required"]),
        ("/api/companies", json!({ "website": "initech.test" }), vec!["Company name is required"]),
        ("/api/tasks", json!({ "title": "Call back" }), vec!["Due date is required"]),
        ("/api/tasks", json!({ "title": "Call back", "dueDate": "soon" }), vec!["Due date must be a date (YYYY-MM-DD)"]),
    ];

    for (uri, body, details) in cases {
        let before = ctx.store.operations();
        let req = api(Method::POST, uri, &cookie).set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["error"], "Validation failed", "{uri}");
        assert_eq!(err["details"], json!(details), "{uri}");
        assert_eq!(ctx.store.operations(), before, "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_task_toggle_stamps_and_clears_completion() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "toggle@acme.test", "Acme Corp");

    let req = api(Method::POST, "/api/tasks", &cookie)
        .set_json(json!({ "title": "Send contract", "dueDate": "2030-01-15" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["item"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["item"]["status"], "pending");
    assert_eq!(created["item"]["completed_at"], Value::Null);

    let uri = format!("/api/tasks/{id}/toggle");
    let req = api(Method::POST, &uri, &cookie).to_request();
    let done: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(done["item"]["status"], "completed");
    assert_eq!(done["item"]["completed_at"], Utc::now().date_naive().to_string());
    assert_eq!(done["items"][0]["status"], "completed");

    let req = api(Method::POST, &uri, &cookie).to_request();
    let reopened: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reopened["item"]["status"], "pending");
    assert_eq!(reopened["item"]["completed_at"], Value::Null);
}

#[actix_web::test]
async fn test_task_stats_and_filters() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "stats@acme.test", "Acme Corp");

    let today = Utc::now().date_naive();
    let yesterday = (today - Duration::days(1)).to_string();
    let next_week = (today + Duration::days(7)).to_string();
    let tasks = [
        json!({ "title": "Late call", "dueDate": yesterday, "priority": "high" }),
        json!({ "title": "Late but done", "dueDate": yesterday, "status": "completed" }),
        json!({ "title": "Drafting", "dueDate": next_week, "status": "in-progress", "priority": "high" }),
        json!({ "title": "Later", "dueDate": next_week, "priority": "low" }),
    ];
    for body in tasks {
        let req = api(Method::POST, "/api/tasks", &cookie).set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = api(Method::GET, "/api/tasks/stats", &cookie).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats, json!({ "total": 4, "inProgress": 1, "completed": 1, "overdue": 1 }));

    let titles = |list: &Value| -> Vec<String> {
        let mut t: Vec<String> = list.as_array().unwrap().iter().map(|r| r["title"].as_str().unwrap().to_string()).collect();
        t.sort();
        t
    };
    let req = api(Method::GET, "/api/tasks?priority=high", &cookie).to_request();
    let high: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&high), vec!["Drafting", "Late call"]);

    let req = api(Method::GET, "/api/tasks?priority=high&status=in-progress", &cookie).to_request();
    let drafting: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(titles(&drafting), vec!["Drafting"]);

    let req = api(Method::GET, "/api/tasks?priority=all&status=all", &cookie).to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_lead_filters_combine_search_status_and_source() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);
    let cookie = register!(app, "leads@acme.test", "Acme Corp");

    let leads = [
        json!({ "firstName": "Lee", "lastName": "Smith", "company": "Initech", "status": "new", "source": "website" }),
        json!({ "firstName": "Mia", "lastName": "Jones", "email": "mia@initech.test", "status": "qualified", "source": "referral" }),
        json!({ "firstName": "Ned", "lastName": "Stark", "status": "new", "source": "Referral" }),
    ];
    for body in leads {
        let req = api(Method::POST, "/api/leads", &cookie).set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let names = |list: &Value| -> Vec<String> {
        let mut n: Vec<String> = list.as_array().unwrap().iter().map(|r| r["first_name"].as_str().unwrap().to_string()).collect();
        n.sort();
        n
    };

    // Search covers name, company and email, case-insensitively
    let req = api(Method::GET, "/api/leads?search=INITECH", &cookie).to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&found), vec!["Lee", "Mia"]);

    let req = api(Method::GET, "/api/leads?status=new&source=referral", &cookie).to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&found), vec!["Ned"]);

    let req = api(Method::GET, "/api/leads?search=&status=all&source=all", &cookie).to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 3);
}
