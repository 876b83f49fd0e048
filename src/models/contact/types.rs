use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub is_vip: bool,
    pub email_opt_in: bool,
    pub sms_opt_in: bool,
    pub preferred_contact: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub created_by: Uuid,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub is_vip: bool,
    pub email_opt_in: bool,
    pub sms_opt_in: bool,
    pub preferred_contact: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
}

/// Free-text search over name, company and email (case-insensitive).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFilter {
    pub search: Option<String>,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        contact.full_name().to_lowercase().contains(&term)
            || contact.company_name.as_deref().unwrap_or("").to_lowercase().contains(&term)
            || contact.email.as_deref().unwrap_or("").to_lowercase().contains(&term)
    }
}
