//! In-process store for demos (`CRM_STORE=memory`) and tests.
//!
//! Mirrors the SQL semantics of `PgStore`: owner-scoped writes, newest-first
//! lists, unique user emails and invite tokens, and stage-only stage updates.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::activity::{Activity, NewActivity};
use crate::models::company::{Company, CompanyPayload};
use crate::models::contact::{Contact, ContactPayload};
use crate::models::deal::{Deal, DealPayload, Stage, WonDeal};
use crate::models::invite::{Invite, InviteStatus, NewInvite};
use crate::models::lead::{Lead, LeadPayload};
use crate::models::task::{Task, TaskPayload, TaskStatus};
use crate::models::user::{Credentials, NewUser, UserName, UserProfile};
use super::{Owner, RecordStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct UserRow {
    profile: UserProfile,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    companies: Vec<Company>,
    contacts: Vec<Contact>,
    leads: Vec<Lead>,
    deals: Vec<Deal>,
    tasks: Vec<Task>,
    activities: Vec<Activity>,
    invites: Vec<Invite>,
}

#[derive(Default)]
struct Faults {
    /// When set, every write fails with this message.
    reject_writes: Option<String>,
    /// Operations (by method name) that fail with a backend error.
    failing: HashSet<&'static str>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls issued so far.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with `message`.
    #[cfg(any(test, feature = "test-util"))]
    pub fn reject_writes(&self, message: &str) {
        self.faults().reject_writes = Some(message.to_string());
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn accept_writes(&self) {
        self.faults().reject_writes = None;
    }

    /// Make one named operation (e.g. `"recent_activities"`) fail.
    #[cfg(any(test, feature = "test-util"))]
    pub fn fail_operation(&self, op: &'static str) {
        self.faults().failing.insert(op);
    }

    pub fn invites(&self) -> Vec<Invite> {
        self.tables().invites.clone()
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.tables().activities.clone()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn faults(&self) -> MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self, op: &'static str) -> StoreResult<MutexGuard<'_, Tables>> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if self.faults().failing.contains(op) {
            return Err(StoreError::Rejected(format!("{op} failed")));
        }
        Ok(self.tables())
    }

    fn write(&self, op: &'static str) -> StoreResult<MutexGuard<'_, Tables>> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        let faults = self.faults();
        if let Some(msg) = &faults.reject_writes {
            return Err(StoreError::Rejected(msg.clone()));
        }
        if faults.failing.contains(op) {
            return Err(StoreError::Rejected(format!("{op} failed")));
        }
        drop(faults);
        Ok(self.tables())
    }
}

fn newest_first<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().rev().filter(|r| keep(r)).cloned().collect()
}

fn by_due_date(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
    tasks
}

/// `LOWER(a) = LOWER(b)`, as the unique index on users compares them.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn in_company(row_company: &Option<String>, company: &str) -> bool {
    row_company.as_deref() == Some(company)
}

fn deal_row(id: Uuid, owner: &Owner, p: &DealPayload, created_at: chrono::DateTime<Utc>) -> Deal {
    Deal {
        id,
        title: p.title.clone(),
        description: p.description.clone(),
        value: p.value,
        currency: p.currency.clone(),
        stage: p.stage.as_str().to_string(),
        probability: p.probability,
        priority: p.priority.as_str().to_string(),
        close_date: p.close_date,
        contact_id: p.contact_id,
        company_id: p.company_id,
        assigned_to: p.assigned_to,
        source: p.source.clone(),
        deal_type: p.deal_type.clone(),
        notes: p.notes.clone(),
        tags: p.tags.clone(),
        competitors: p.competitors.clone(),
        next_steps: p.next_steps.clone(),
        loss_reason: p.loss_reason.clone(),
        won_at: p.won_at,
        created_by: owner.user_id,
        company: owner.company.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

fn contact_row(id: Uuid, owner: &Owner, p: &ContactPayload, created_at: chrono::DateTime<Utc>) -> Contact {
    Contact {
        id,
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
        company_name: p.company_name.clone(),
        title: p.title.clone(),
        department: p.department.clone(),
        email: p.email.clone(),
        phone: p.phone.clone(),
        mobile: p.mobile.clone(),
        website: p.website.clone(),
        linkedin: p.linkedin.clone(),
        twitter: p.twitter.clone(),
        address: p.address.clone(),
        city: p.city.clone(),
        state: p.state.clone(),
        zip_code: p.zip_code.clone(),
        country: p.country.clone(),
        birthday: p.birthday,
        notes: p.notes.clone(),
        tags: p.tags.clone(),
        is_vip: p.is_vip,
        email_opt_in: p.email_opt_in,
        sms_opt_in: p.sms_opt_in,
        preferred_contact: p.preferred_contact.clone(),
        timezone: p.timezone.clone(),
        language: p.language.clone(),
        created_by: owner.user_id,
        company: owner.company.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

fn lead_row(id: Uuid, owner: &Owner, p: &LeadPayload, created_at: chrono::DateTime<Utc>) -> Lead {
    Lead {
        id,
        first_name: p.first_name.clone(),
        last_name: p.last_name.clone(),
        company_name: p.company_name.clone(),
        title: p.title.clone(),
        email: p.email.clone(),
        phone: p.phone.clone(),
        website: p.website.clone(),
        source: p.source.clone(),
        status: p.status.clone(),
        estimated_value: p.estimated_value,
        expected_close_date: p.expected_close_date,
        address: p.address.clone(),
        city: p.city.clone(),
        state: p.state.clone(),
        zip_code: p.zip_code.clone(),
        country: p.country.clone(),
        notes: p.notes.clone(),
        tags: p.tags.clone(),
        created_by: owner.user_id,
        company: owner.company.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

fn company_row(id: Uuid, owner: &Owner, p: &CompanyPayload, created_at: chrono::DateTime<Utc>) -> Company {
    Company {
        id,
        name: p.name.clone(),
        website: p.website.clone(),
        industry: p.industry.clone(),
        size: p.size.clone(),
        revenue: p.revenue.clone(),
        phone: p.phone.clone(),
        email: p.email.clone(),
        address: p.address.clone(),
        city: p.city.clone(),
        state: p.state.clone(),
        zip_code: p.zip_code.clone(),
        country: p.country.clone(),
        description: p.description.clone(),
        tags: p.tags.clone(),
        social_media: p.social_media.clone(),
        created_by: owner.user_id,
        company: owner.company.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

fn task_row(id: Uuid, owner: &Owner, p: &TaskPayload, created_at: chrono::DateTime<Utc>) -> Task {
    Task {
        id,
        title: p.title.clone(),
        description: p.description.clone(),
        priority: p.priority.clone(),
        status: p.status.as_str().to_string(),
        due_date: p.due_date,
        due_time: p.due_time.clone(),
        assigned_to: p.assigned_to,
        linked_to: p.linked_to.clone(),
        linked_type: p.linked_type.clone(),
        category: p.category.clone(),
        estimated_hours: p.estimated_hours,
        actual_hours: p.actual_hours,
        is_recurring: p.is_recurring,
        recurring_type: p.recurring_type.clone(),
        reminder_before: p.reminder_before.clone(),
        notes: p.notes.clone(),
        tags: p.tags.clone(),
        attachments: p.attachments.clone(),
        completed_at: p.completed_at,
        created_by: owner.user_id,
        company: owner.company.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

/// Replace the owner's row `id` with `build(existing)`; `None` if not owned.
fn replace_owned<T: Clone>(
    rows: &mut [T],
    owner: Uuid,
    id: Uuid,
    key: impl Fn(&T) -> (Uuid, Uuid),
    build: impl FnOnce(&T) -> T,
) -> Option<T> {
    let row = rows.iter_mut().find(|r| key(r) == (id, owner))?;
    *row = build(row);
    Some(row.clone())
}

fn remove_owned<T>(rows: &mut Vec<T>, owner: Uuid, id: Uuid, key: impl Fn(&T) -> (Uuid, Uuid)) -> bool {
    let before = rows.len();
    rows.retain(|r| key(r) != (id, owner));
    rows.len() != before
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_user(&self, new: &NewUser) -> StoreResult<UserProfile> {
        let mut t = self.write("create_user")?;
        if t.users.iter().any(|u| same_email(&u.profile.email, &new.email)) {
            return Err(StoreError::Rejected(
                "duplicate key value violates unique constraint \"users_email_lower_key\"".to_string(),
            ));
        }
        let profile = UserProfile {
            id: Uuid::new_v4(),
            email: new.email.clone(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            company: new.company.clone(),
            role: new.role.clone(),
            created_at: Utc::now(),
        };
        t.users.push(UserRow { profile: profile.clone(), password_hash: new.password_hash.clone() });
        Ok(profile)
    }

    async fn find_credentials(&self, email: &str) -> StoreResult<Option<Credentials>> {
        let t = self.read("find_credentials")?;
        Ok(t.users.iter().find(|u| same_email(&u.profile.email, email)).map(|u| Credentials {
            id: u.profile.id,
            email: u.profile.email.clone(),
            password_hash: u.password_hash.clone(),
        }))
    }

    async fn find_profile(&self, user_id: Uuid) -> StoreResult<Option<UserProfile>> {
        let t = self.read("find_profile")?;
        Ok(t.users.iter().find(|u| u.profile.id == user_id).map(|u| u.profile.clone()))
    }

    async fn update_profile_names(&self, user_id: Uuid, first_name: &str, last_name: &str) -> StoreResult<Option<UserProfile>> {
        let mut t = self.write("update_profile_names")?;
        Ok(t.users.iter_mut().find(|u| u.profile.id == user_id).map(|u| {
            u.profile.first_name = first_name.to_string();
            u.profile.last_name = last_name.to_string();
            u.profile.clone()
        }))
    }

    async fn find_members(&self, company: &str) -> StoreResult<Vec<UserProfile>> {
        let t = self.read("find_members")?;
        let mut members: Vec<UserProfile> = t
            .users
            .iter()
            .filter(|u| in_company(&u.profile.company, company))
            .map(|u| u.profile.clone())
            .collect();
        members.sort_by(|a, b| (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name)));
        Ok(members)
    }

    async fn find_user_names(&self, ids: &[Uuid]) -> StoreResult<Vec<UserName>> {
        let t = self.read("find_user_names")?;
        Ok(t.users
            .iter()
            .filter(|u| ids.contains(&u.profile.id))
            .map(|u| UserName {
                id: u.profile.id,
                first_name: u.profile.first_name.clone(),
                last_name: u.profile.last_name.clone(),
            })
            .collect())
    }

    async fn list_companies(&self, owner: Uuid) -> StoreResult<Vec<Company>> {
        let t = self.read("list_companies")?;
        let mut rows: Vec<Company> = t.companies.iter().filter(|c| c.created_by == owner).cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert_company(&self, owner: &Owner, payload: &CompanyPayload) -> StoreResult<Company> {
        let mut t = self.write("insert_company")?;
        let row = company_row(Uuid::new_v4(), owner, payload, Utc::now());
        t.companies.push(row.clone());
        Ok(row)
    }

    async fn update_company(&self, owner: Uuid, id: Uuid, payload: &CompanyPayload) -> StoreResult<Option<Company>> {
        let mut t = self.write("update_company")?;
        Ok(replace_owned(&mut t.companies, owner, id, |c| (c.id, c.created_by), |old| {
            let o = Owner { user_id: old.created_by, company: old.company.clone() };
            company_row(old.id, &o, payload, old.created_at)
        }))
    }

    async fn delete_company(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut t = self.write("delete_company")?;
        Ok(remove_owned(&mut t.companies, owner, id, |c| (c.id, c.created_by)))
    }

    async fn find_company_id_by_name(&self, name: &str) -> StoreResult<Option<Uuid>> {
        let t = self.read("find_company_id_by_name")?;
        Ok(t.companies.iter().find(|c| c.name == name).map(|c| c.id))
    }

    async fn find_company_name(&self, id: Uuid) -> StoreResult<Option<String>> {
        let t = self.read("find_company_name")?;
        Ok(t.companies.iter().find(|c| c.id == id).map(|c| c.name.clone()))
    }

    async fn list_contacts(&self, owner: Uuid) -> StoreResult<Vec<Contact>> {
        let t = self.read("list_contacts")?;
        Ok(newest_first(&t.contacts, |c| c.created_by == owner))
    }

    async fn insert_contact(&self, owner: &Owner, payload: &ContactPayload) -> StoreResult<Contact> {
        let mut t = self.write("insert_contact")?;
        let row = contact_row(Uuid::new_v4(), owner, payload, Utc::now());
        t.contacts.push(row.clone());
        Ok(row)
    }

    async fn update_contact(&self, owner: Uuid, id: Uuid, payload: &ContactPayload) -> StoreResult<Option<Contact>> {
        let mut t = self.write("update_contact")?;
        Ok(replace_owned(&mut t.contacts, owner, id, |c| (c.id, c.created_by), |old| {
            let o = Owner { user_id: old.created_by, company: old.company.clone() };
            contact_row(old.id, &o, payload, old.created_at)
        }))
    }

    async fn delete_contact(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut t = self.write("delete_contact")?;
        Ok(remove_owned(&mut t.contacts, owner, id, |c| (c.id, c.created_by)))
    }

    async fn list_leads(&self, owner: Uuid) -> StoreResult<Vec<Lead>> {
        let t = self.read("list_leads")?;
        Ok(newest_first(&t.leads, |l| l.created_by == owner))
    }

    async fn insert_lead(&self, owner: &Owner, payload: &LeadPayload) -> StoreResult<Lead> {
        let mut t = self.write("insert_lead")?;
        let row = lead_row(Uuid::new_v4(), owner, payload, Utc::now());
        t.leads.push(row.clone());
        Ok(row)
    }

    async fn update_lead(&self, owner: Uuid, id: Uuid, payload: &LeadPayload) -> StoreResult<Option<Lead>> {
        let mut t = self.write("update_lead")?;
        Ok(replace_owned(&mut t.leads, owner, id, |l| (l.id, l.created_by), |old| {
            let o = Owner { user_id: old.created_by, company: old.company.clone() };
            lead_row(old.id, &o, payload, old.created_at)
        }))
    }

    async fn delete_lead(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut t = self.write("delete_lead")?;
        Ok(remove_owned(&mut t.leads, owner, id, |l| (l.id, l.created_by)))
    }

    async fn list_deals(&self, owner: Uuid) -> StoreResult<Vec<Deal>> {
        let t = self.read("list_deals")?;
        Ok(newest_first(&t.deals, |d| d.created_by == owner))
    }

    async fn find_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Deal>> {
        let t = self.read("find_deal")?;
        Ok(t.deals.iter().find(|d| d.id == id && d.created_by == owner).cloned())
    }

    async fn insert_deal(&self, owner: &Owner, payload: &DealPayload) -> StoreResult<Deal> {
        let mut t = self.write("insert_deal")?;
        let row = deal_row(Uuid::new_v4(), owner, payload, Utc::now());
        t.deals.push(row.clone());
        Ok(row)
    }

    async fn update_deal(&self, owner: Uuid, id: Uuid, payload: &DealPayload) -> StoreResult<Option<Deal>> {
        let mut t = self.write("update_deal")?;
        Ok(replace_owned(&mut t.deals, owner, id, |d| (d.id, d.created_by), |old| {
            let o = Owner { user_id: old.created_by, company: old.company.clone() };
            let mut row = deal_row(old.id, &o, payload, old.created_at);
            row.won_at = payload.won_at.or(old.won_at);
            row
        }))
    }

    async fn update_deal_stage(&self, owner: Uuid, id: Uuid, stage: Stage) -> StoreResult<bool> {
        let mut t = self.write("update_deal_stage")?;
        match t.deals.iter_mut().find(|d| d.id == id && d.created_by == owner) {
            Some(deal) => {
                deal.stage = stage.as_str().to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_deal(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut t = self.write("delete_deal")?;
        Ok(remove_owned(&mut t.deals, owner, id, |d| (d.id, d.created_by)))
    }

    async fn list_tasks(&self, owner: Uuid) -> StoreResult<Vec<Task>> {
        let t = self.read("list_tasks")?;
        Ok(by_due_date(t.tasks.iter().filter(|x| x.created_by == owner).cloned().collect()))
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> StoreResult<Option<Task>> {
        let t = self.read("find_task")?;
        Ok(t.tasks.iter().find(|x| x.id == id && x.created_by == owner).cloned())
    }

    async fn insert_task(&self, owner: &Owner, payload: &TaskPayload) -> StoreResult<Task> {
        let mut t = self.write("insert_task")?;
        let row = task_row(Uuid::new_v4(), owner, payload, Utc::now());
        t.tasks.push(row.clone());
        Ok(row)
    }

    async fn update_task(&self, owner: Uuid, id: Uuid, payload: &TaskPayload) -> StoreResult<Option<Task>> {
        let mut t = self.write("update_task")?;
        Ok(replace_owned(&mut t.tasks, owner, id, |x| (x.id, x.created_by), |old| {
            let o = Owner { user_id: old.created_by, company: old.company.clone() };
            let mut row = task_row(old.id, &o, payload, old.created_at);
            row.completed_at = old.completed_at;
            row
        }))
    }

    async fn set_task_status(&self, owner: Uuid, id: Uuid, status: TaskStatus, completed_at: Option<NaiveDate>) -> StoreResult<bool> {
        let mut t = self.write("set_task_status")?;
        match t.tasks.iter_mut().find(|x| x.id == id && x.created_by == owner) {
            Some(task) => {
                task.status = status.as_str().to_string();
                task.completed_at = completed_at;
                task.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> StoreResult<bool> {
        let mut t = self.write("delete_task")?;
        Ok(remove_owned(&mut t.tasks, owner, id, |x| (x.id, x.created_by)))
    }

    async fn company_deals(&self, company: &str) -> StoreResult<Vec<Deal>> {
        let t = self.read("company_deals")?;
        Ok(newest_first(&t.deals, |d| in_company(&d.company, company)))
    }

    async fn company_leads(&self, company: &str) -> StoreResult<Vec<Lead>> {
        let t = self.read("company_leads")?;
        Ok(newest_first(&t.leads, |l| in_company(&l.company, company)))
    }

    async fn company_tasks(&self, company: &str) -> StoreResult<Vec<Task>> {
        let t = self.read("company_tasks")?;
        Ok(by_due_date(t.tasks.iter().filter(|x| in_company(&x.company, company)).cloned().collect()))
    }

    async fn count_leads(&self, company: &str) -> StoreResult<i64> {
        let t = self.read("count_leads")?;
        Ok(t.leads.iter().filter(|l| in_company(&l.company, company)).count() as i64)
    }

    async fn count_deals_in_stage(&self, company: &str, stage: Stage) -> StoreResult<i64> {
        let t = self.read("count_deals_in_stage")?;
        Ok(t.deals
            .iter()
            .filter(|d| in_company(&d.company, company) && d.stage == stage.as_str())
            .count() as i64)
    }

    async fn sum_won_value(&self, company: &str) -> StoreResult<f64> {
        let t = self.read("sum_won_value")?;
        Ok(t.deals
            .iter()
            .filter(|d| in_company(&d.company, company) && d.stage == Stage::Won.as_str())
            .map(Deal::value_or_zero)
            .sum())
    }

    async fn won_deals(&self, company: &str) -> StoreResult<Vec<WonDeal>> {
        let t = self.read("won_deals")?;
        Ok(t.deals
            .iter()
            .filter(|d| in_company(&d.company, company) && d.stage == Stage::Won.as_str())
            .map(|d| WonDeal { value: d.value, won_on: d.won_at })
            .collect())
    }

    async fn count_tasks_due(&self, company: &str, day: NaiveDate) -> StoreResult<i64> {
        let t = self.read("count_tasks_due")?;
        Ok(t.tasks
            .iter()
            .filter(|x| in_company(&x.company, company) && x.due_date == Some(day))
            .count() as i64)
    }

    async fn recent_activities(&self, company: &str, limit: i64) -> StoreResult<Vec<Activity>> {
        let t = self.read("recent_activities")?;
        let mut rows = newest_first(&t.activities, |a| in_company(&a.company, company));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn record_activity(&self, new: &NewActivity) -> StoreResult<()> {
        let mut t = self.write("record_activity")?;
        t.activities.push(Activity {
            id: Uuid::new_v4(),
            company: new.company.clone(),
            activity_type: new.activity_type.clone(),
            title: new.title.clone(),
            description: new.description.clone(),
            assigned_to: new.assigned_to,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn insert_invite(&self, new: &NewInvite) -> StoreResult<Invite> {
        let mut t = self.write("insert_invite")?;
        if t.invites.iter().any(|i| i.token == new.token) {
            return Err(StoreError::Rejected(
                "duplicate key value violates unique constraint \"invites_token_key\"".to_string(),
            ));
        }
        let invite = Invite {
            id: Uuid::new_v4(),
            email: new.email.clone(),
            company: new.company,
            role: new.role.clone(),
            invited_by: new.invited_by,
            token: new.token.clone(),
            status: InviteStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
        };
        t.invites.push(invite.clone());
        Ok(invite)
    }

    async fn find_invite_by_token(&self, token: &str) -> StoreResult<Option<Invite>> {
        let t = self.read("find_invite_by_token")?;
        Ok(t.invites.iter().find(|i| i.token == token).cloned())
    }

    async fn mark_invite_accepted(&self, token: &str) -> StoreResult<bool> {
        let mut t = self.write("mark_invite_accepted")?;
        match t.invites.iter_mut().find(|i| i.token == token && i.is_pending()) {
            Some(invite) => {
                invite.status = InviteStatus::Accepted.as_str().to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pending_invites(&self, company: Uuid) -> StoreResult<Vec<Invite>> {
        let t = self.read("pending_invites")?;
        Ok(newest_first(&t.invites, |i| i.company == company && i.is_pending()))
    }
}
