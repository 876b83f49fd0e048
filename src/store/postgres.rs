use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::activity::{self, Activity, NewActivity};
use crate::models::company::{self, Company, CompanyPayload};
use crate::models::contact::{self, Contact, ContactPayload};
use crate::models::deal::{self, Deal, DealPayload, Stage, WonDeal};
use crate::models::invite::{self, Invite, NewInvite};
use crate::models::lead::{self, Lead, LeadPayload};
use crate::models::task::{self, Task, TaskPayload, TaskStatus};
use crate::models::user::{self, Credentials, NewUser, UserName, UserProfile};
use super::{Owner, RecordStore, StoreResult};

/// PostgreSQL-backed store. Each method delegates to the entity's query module.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn create_user(&self, new: &NewUser) -> StoreResult<UserProfile> {
        Ok(user::create(&self.pool, new).await?)
    }

    async fn find_credentials(&self, email: &str) -> StoreResult<Option<Credentials>> {
        Ok(user::find_credentials(&self.pool, email).await?)
    }

    async fn find_profile(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(user::find_profile(&self.pool, user_id).await?)
    }

    async fn update_profile_names(&self, user_id: Uuid, first_name: &str, last_name: &str) -> StoreResult<Option<UserProfile>> {
        Ok(user::update_names(&self.pool, user_id, first_name, last_name).await?)
    }

    async fn find_members(&self, company: &str) -> StoreResult<Vec<UserProfile>> {
        Ok(user::find_by_company(&self.pool, company).await?)
    }

    async fn find_user_names(&self, ids: &[Uuid]) -> StoreResult<Vec<UserName>> {
        Ok(user::find_names(&self.pool, ids).await?)
    }

    async fn list_companies(&self, owner: Uuid) -> StoreResult<Vec<Company>> {
        Ok(company::find_by_owner(&self.pool, owner).await?)
    }

    async fn insert_company(&self, owner: &Owner, payload: &CompanyPayload) -> StoreResult<Company> {
        Ok(company::create(&self.pool, owner, payload).await?)
    }

    async fn update_company(&self, owner: Uuid, id: Uuid, payload: &CompanyPayload) -> StoreResult<Option<Company>> {
        Ok(company::update(&self.pool, owner, id, payload).await?)
    }

    async fn delete_company(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(company::delete(&self.pool, owner, id).await?)
    }

    async fn find_company_id_by_name(&self, name: &str) -> StoreResult<Option<Uuid>> {
        Ok(company::find_id_by_name(&self.pool, name).await?)
    }

    async fn find_company_name(&self, id: Uuid) -> StoreResult<Option<String>> {
        Ok(company::find_name(&self.pool, id).await?)
    }

    async fn list_contacts(&self, owner: Uuid) -> StoreResult<Vec<Contact>> {
        Ok(contact::find_by_owner(&self.pool, owner).await?)
    }

    async fn insert_contact(&self, owner: &Owner, payload: &ContactPayload) -> StoreResult<Contact> {
        Ok(contact::create(&self.pool, owner, payload).await?)
    }

    async fn update_contact(&self, owner: Uuid, id: Uuid, payload: &ContactPayload) -> StoreResult<Option<Contact>> {
        Ok(contact::update(&self.pool, owner, id, payload).await?)
    }

    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(contact::delete(&self.pool, owner, id).await?)
    }

    async fn list_leads(&self, owner: Uuid) -> StoreResult<Vec<Lead>> {
        Ok(lead::find_by_owner(&self.pool, owner).await?)
    }

    async fn insert_lead(&self, owner: &Owner, payload: &LeadPayload) -> StoreResult<Lead> {
        Ok(lead::create(&self.pool, owner, payload).await?)
    }

    async fn update_lead(&self, owner: Uuid, id: Uuid, payload: &LeadPayload) -> StoreResult<Option<Lead>> {
        Ok(lead::update(&self.pool, owner, id, payload).await?)
    }

    async fn delete_lead(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(lead::delete(&self.pool, owner, id).await?)
    }

    async fn list_deals(&self, owner: Uuid) -> StoreResult<Vec<Deal>> {
        Ok(deal::find_by_owner(&self.pool, owner).await?)
    }

    async fn find_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Deal>> {
        Ok(deal::find_owned(&self.pool, owner, id).await?)
    }

    async fn insert_deal(&self, owner: &Owner, payload: &DealPayload) -> StoreResult<Deal> {
        Ok(deal::create(&self.pool, owner, payload).await?)
    }

    async fn update_deal(&self, owner: Uuid, id: Uuid, payload: &DealPayload) -> StoreResult<Option<Deal>> {
        Ok(deal::update(&self.pool, owner, id, payload).await?)
    }

    async fn update_deal_stage(&self, owner: Uuid, id: Uuid, stage: Stage) -> StoreResult<bool> {
        Ok(deal::update_stage(&self.pool, owner, id, stage).await?)
    }

    async fn delete_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(deal::delete(&self.pool, owner, id).await?)
    }

    async fn list_tasks(&self, owner: Uuid) -> StoreResult<Vec<Task>> {
        Ok(task::find_by_owner(&self.pool, owner).await?)
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(task::find_owned(&self.pool, owner, id).await?)
    }

    async fn insert_task(&self, owner: &Owner, payload: &TaskPayload) -> StoreResult<Task> {
        Ok(task::create(&self.pool, owner, payload).await?)
    }

    async fn update_task(&self, owner: Uuid, id: Uuid, payload: &TaskPayload) -> StoreResult<Option<Task>> {
        Ok(task::update(&self.pool, owner, id, payload).await?)
    }

    async fn set_task_status(&self, owner: Uuid, id: Uuid, status: TaskStatus, completed_at: Option<NaiveDate>) -> StoreResult<bool> {
        Ok(task::set_status(&self.pool, owner, id, status, completed_at).await?)
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        Ok(task::delete(&self.pool, owner, id).await?)
    }

    async fn company_deals(&self, company: &str) -> StoreResult<Vec<Deal>> {
        Ok(deal::find_by_company(&self.pool, company).await?)
    }

    async fn company_leads(&self, company: &str) -> StoreResult<Vec<Lead>> {
        Ok(lead::find_by_company(&self.pool, company).await?)
    }

    async fn company_tasks(&self, company: &str) -> StoreResult<Vec<Task>> {
        Ok(task::find_by_company(&self.pool, company).await?)
    }

    async fn count_leads(&self, company: &str) -> StoreResult<i64> {
        Ok(lead::count_by_company(&self.pool, company).await?)
    }

    async fn count_deals_in_stage(&self, company: &str, stage: Stage) -> StoreResult<i64> {
        Ok(deal::count_in_stage(&self.pool, company, stage).await?)
    }

    async fn sum_won_value(&self, company: &str) -> StoreResult<f64> {
        Ok(deal::sum_won_value(&self.pool, company).await?)
    }

    async fn won_deals(&self, company: &str) -> StoreResult<Vec<WonDeal>> {
        Ok(deal::find_won(&self.pool, company).await?)
    }

    async fn count_tasks_due(&self, company: &str, day: NaiveDate) -> StoreResult<i64> {
        Ok(task::count_due_on(&self.pool, company, day).await?)
    }

    async fn recent_activities(&self, company: &str, limit: i64) -> StoreResult<Vec<Activity>> {
        Ok(activity::find_recent(&self.pool, company, limit).await?)
    }

    async fn record_activity(&self, new: &NewActivity) -> StoreResult<()> {
        Ok(activity::create(&self.pool, new).await?)
    }

    async fn insert_invite(&self, new: &NewInvite) -> StoreResult<Invite> {
        Ok(invite::create(&self.pool, new).await?)
    }

    async fn find_invite_by_token(&self, token: &str) -> StoreResult<Option<Invite>> {
        Ok(invite::find_by_token(&self.pool, token).await?)
    }

    async fn mark_invite_accepted(&self, token: &str) -> StoreResult<bool> {
        Ok(invite::mark_accepted(&self.pool, token).await?)
    }

    async fn pending_invites(&self, company: Uuid) -> StoreResult<Vec<Invite>> {
        Ok(invite::find_pending(&self.pool, company).await?)
    }
}
