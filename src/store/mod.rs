//! Record store client: the only way handlers reach persisted CRM data.
//!
//! Every owner-scoped method filters by `created_by`; company-scoped reads
//! filter by the denormalized `company` scalar stamped on each row at insert.

mod memory;
mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::activity::{Activity, NewActivity};
use crate::models::company::{Company, CompanyPayload};
use crate::models::contact::{Contact, ContactPayload};
use crate::models::deal::{Deal, DealPayload, Stage, WonDeal};
use crate::models::invite::{Invite, NewInvite};
use crate::models::lead::{Lead, LeadPayload};
use crate::models::task::{Task, TaskPayload, TaskStatus};
use crate::models::user::{Credentials, NewUser, UserName, UserProfile};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// The acting user, attached to every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub user_id: Uuid,
    pub company: Option<String>,
}

#[derive(Debug)]
pub enum StoreError {
    Db(sqlx::Error),
    /// Write refused by the backend; message is passed through unchanged.
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(e) => match e.as_database_error() {
                Some(db) => write!(f, "{}", db.message()),
                None => write!(f, "{e}"),
            },
            StoreError::Rejected(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Db(e)
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    // users
    async fn create_user(&self, new: &NewUser) -> StoreResult<UserProfile>;
    async fn find_credentials(&self, email: &str) -> StoreResult<Option<Credentials>>;
    async fn find_profile(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>>;
    async fn update_profile_names(&self, user_id: Uuid, first_name: &str, last_name: &str) -> StoreResult<Option<UserProfile>>;
    async fn find_members(&self, company: &str) -> StoreResult<Vec<UserProfile>>;
    async fn find_user_names(&self, ids: &[Uuid]) -> StoreResult<Vec<UserName>>;

    // companies
    async fn list_companies(&self, owner: Uuid) -> StoreResult<Vec<Company>>;
    async fn insert_company(&self, owner: &Owner, payload: &CompanyPayload) -> StoreResult<Company>;
    async fn update_company(&self, owner: Uuid, id: Uuid, payload: &CompanyPayload) -> StoreResult<Option<Company>>;
    async fn delete_company(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;
    async fn find_company_id_by_name(&self, name: &str) -> StoreResult<Option<Uuid>>;
    async fn find_company_name(&self, id: Uuid) -> StoreResult<Option<String>>;

    // contacts
    async fn list_contacts(&self, owner: Uuid) -> StoreResult<Vec<Contact>>;
    async fn insert_contact(&self, owner: &Owner, payload: &ContactPayload) -> StoreResult<Contact>;
    async fn update_contact(&self, owner: Uuid, id: Uuid, payload: &ContactPayload) -> StoreResult<Option<Contact>>;
    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;

    // leads
    async fn list_leads(&self, owner: Uuid) -> StoreResult<Vec<Lead>>;
    async fn insert_lead(&self, owner: &Owner, payload: &LeadPayload) -> StoreResult<Lead>;
    async fn update_lead(&self, owner: Uuid, id: Uuid, payload: &LeadPayload) -> StoreResult<Option<Lead>>;
    async fn delete_lead(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;

    // deals
    async fn list_deals(&self, owner: Uuid) -> StoreResult<Vec<Deal>>;
    async fn find_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Deal>>;
    async fn insert_deal(&self, owner: &Owner, payload: &DealPayload) -> StoreResult<Deal>;
    async fn update_deal(&self, owner: Uuid, id: Uuid, payload: &DealPayload) -> StoreResult<Option<Deal>>;
    /// Writes the stage column and nothing else.
    async fn update_deal_stage(&self, owner: Uuid, id: Uuid, stage: Stage) -> StoreResult<bool>;
    async fn delete_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;

    // tasks
    async fn list_tasks(&self, owner: Uuid) -> StoreResult<Vec<Task>>;
    async fn find_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>>;
    async fn insert_task(&self, owner: &Owner, payload: &TaskPayload) -> StoreResult<Task>;
    async fn update_task(&self, owner: Uuid, id: Uuid, payload: &TaskPayload) -> StoreResult<Option<Task>>;
    async fn set_task_status(&self, owner: Uuid, id: Uuid, status: TaskStatus, completed_at: Option<NaiveDate>) -> StoreResult<bool>;
    async fn delete_task(&self, owner: Uuid, id: Uuid) -> StoreResult<bool>;

    // company-scoped reads
    async fn company_deals(&self, company: &str) -> StoreResult<Vec<Deal>>;
    async fn company_leads(&self, company: &str) -> StoreResult<Vec<Lead>>;
    async fn company_tasks(&self, company: &str) -> StoreResult<Vec<Task>>;

    // aggregates
    async fn count_leads(&self, company: &str) -> StoreResult<i64>;
    async fn count_deals_in_stage(&self, company: &str, stage: Stage) -> StoreResult<i64>;
    async fn sum_won_value(&self, company: &str) -> StoreResult<f64>;
    async fn won_deals(&self, company: &str) -> StoreResult<Vec<WonDeal>>;
    async fn count_tasks_due(&self, company: &str, day: NaiveDate) -> StoreResult<i64>;
    async fn recent_activities(&self, company: &str, limit: i64) -> StoreResult<Vec<Activity>>;

    // activities
    async fn record_activity(&self, new: &NewActivity) -> StoreResult<()>;

    // invites
    async fn insert_invite(&self, new: &NewInvite) -> StoreResult<Invite>;
    async fn find_invite_by_token(&self, token: &str) -> StoreResult<Option<Invite>>;
    async fn mark_invite_accepted(&self, token: &str) -> StoreResult<bool>;
    /// Pending invites for a companies row, newest first.
    async fn pending_invites(&self, company: Uuid) -> StoreResult<Vec<Invite>>;
}
