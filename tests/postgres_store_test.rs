/// `PgStore` against a real database. Needs `DATABASE_URL` and runs only with
/// `cargo test --features postgres-tests`.

use chrono::NaiveDate;
use sqlx::PgPool;

use crm::models::company::CompanyPayload;
use crm::models::deal::{DealPayload, Stage};
use crm::models::invite::NewInvite;
use crm::models::user::{NewUser, UserProfile};
use crm::store::{Owner, PgStore, RecordStore};

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn seed_user(store: &PgStore, email: &str, company: &str) -> Result<UserProfile, Box<dyn std::error::Error>> {
    Ok(store
        .create_user(&NewUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".into(),
            first_name: "Pat".into(),
            last_name: "Lee".into(),
            company: Some(company.to_string()),
            role: "member".into(),
        })
        .await?)
}

fn owner_of(user: &UserProfile) -> Owner {
    Owner { user_id: user.id, company: user.company.clone() }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stage_update_leaves_other_columns_alone(pool: PgPool) -> TestResult {
    let store = PgStore::new(pool);
    let user = seed_user(&store, "stage@acme.test", "Acme Corp").await?;
    let owner = owner_of(&user);

    let mut payload = DealPayload::new("Renewal", Stage::Proposal);
    payload.value = Some(12000.0);
    payload.notes = Some("Send revised quote".into());
    let before = store.insert_deal(&owner, &payload).await?;

    assert!(store.update_deal_stage(user.id, before.id, Stage::Negotiation).await?);
    let after = store.find_deal(user.id, before.id).await?.ok_or("deal vanished")?;
    assert_eq!(after.stage, "negotiation");
    assert_eq!(after.updated_at, before.updated_at);
    let mut expected = before.clone();
    expected.stage = "negotiation".into();
    assert_eq!(after, expected);

    // Another owner's id is a no-op
    let other = seed_user(&store, "other@acme.test", "Acme Corp").await?;
    assert!(!store.update_deal_stage(other.id, before.id, Stage::Lost).await?);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_full_edit_keeps_win_date_when_omitted(pool: PgPool) -> TestResult {
    let store = PgStore::new(pool);
    let user = seed_user(&store, "edit@acme.test", "Acme Corp").await?;

    let mut payload = DealPayload::new("Closed", Stage::Won);
    payload.value = Some(500.0);
    payload.won_at = NaiveDate::from_ymd_opt(2024, 3, 5);
    let deal = store.insert_deal(&owner_of(&user), &payload).await?;

    payload.won_at = None;
    payload.value = Some(900.0);
    let edited = store.update_deal(user.id, deal.id, &payload).await?.ok_or("deal vanished")?;
    assert_eq!(edited.won_at, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert_eq!(edited.value, Some(900.0));
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_aggregates_are_scoped_to_the_company(pool: PgPool) -> TestResult {
    let store = PgStore::new(pool);
    let acme = owner_of(&seed_user(&store, "agg@acme.test", "Acme Corp").await?);
    let globex = owner_of(&seed_user(&store, "agg@globex.test", "Globex").await?);

    let won = |title: &str, value: f64, won_at: Option<NaiveDate>| {
        let mut payload = DealPayload::new(title, Stage::Won);
        payload.value = Some(value);
        payload.won_at = won_at;
        payload
    };
    store.insert_deal(&acme, &won("March", 1000.0, NaiveDate::from_ymd_opt(2024, 3, 15))).await?;
    store.insert_deal(&acme, &won("Undated", 250.0, None)).await?;
    store.insert_deal(&acme, &DealPayload::new("Talks", Stage::Negotiation)).await?;
    store.insert_deal(&globex, &won("Elsewhere", 9999.0, None)).await?;

    assert_eq!(store.sum_won_value("Acme Corp").await?, 1250.0);
    assert_eq!(store.sum_won_value("Nobody").await?, 0.0);
    assert_eq!(store.count_deals_in_stage("Acme Corp", Stage::Won).await?, 2);
    assert_eq!(store.count_deals_in_stage("Acme Corp", Stage::Negotiation).await?, 1);
    assert_eq!(store.count_deals_in_stage("Acme Corp", Stage::Lost).await?, 0);

    let mut won_on: Vec<Option<NaiveDate>> = store.won_deals("Acme Corp").await?.into_iter().map(|d| d.won_on).collect();
    won_on.sort();
    assert_eq!(won_on, vec![None, NaiveDate::from_ymd_opt(2024, 3, 15)]);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invite_is_accepted_once(pool: PgPool) -> TestResult {
    let store = PgStore::new(pool);
    let founder = seed_user(&store, "founder@acme.test", "Acme Corp").await?;
    let company = store.insert_company(&owner_of(&founder), &CompanyPayload::named("Acme Corp")).await?;

    let invite = store
        .insert_invite(&NewInvite::issue("hire@acme.test", company.id, "member", founder.id))
        .await?;
    let other = store
        .insert_invite(&NewInvite::issue("later@acme.test", company.id, "member", founder.id))
        .await?;
    assert_eq!(store.pending_invites(company.id).await?.len(), 2);

    assert!(store.mark_invite_accepted(&invite.token).await?);
    assert!(!store.mark_invite_accepted(&invite.token).await?);
    assert!(!store.mark_invite_accepted("no-such-token").await?);

    let found = store.find_invite_by_token(&invite.token).await?.ok_or("invite vanished")?;
    assert_eq!(found.status, "accepted");
    let pending = store.pending_invites(company.id).await?;
    assert_eq!(pending.iter().map(|i| i.id).collect::<Vec<_>>(), vec![other.id]);
    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_email_uniqueness_ignores_case(pool: PgPool) -> TestResult {
    let store = PgStore::new(pool);
    seed_user(&store, "Case@Acme.test", "Acme Corp").await?;

    let err = seed_user(&store, "case@acme.test", "Acme Corp").await.err().ok_or("duplicate accepted")?;
    assert!(err.to_string().contains("users_email_lower_key"), "{err}");

    let creds = store.find_credentials("CASE@ACME.TEST").await?.ok_or("lookup missed")?;
    assert_eq!(creds.email, "Case@Acme.test");
    Ok(())
}
