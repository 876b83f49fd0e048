use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub revenue: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub social_media: Value,
    pub created_by: Uuid,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPayload {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub revenue: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub social_media: Value,
}

impl CompanyPayload {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            website: None,
            industry: None,
            size: None,
            revenue: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            description: None,
            tags: Vec::new(),
            social_media: Value::Object(Default::default()),
        }
    }
}

/// How a stored company scalar mapped to a companies row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyResolution {
    /// The scalar was already a UUID and is used as-is.
    AlreadyId(Uuid),
    /// The scalar was a display name, matched to this row.
    ResolvedFromName(Uuid),
    NotFound,
}

impl CompanyResolution {
    pub fn id(self) -> Option<Uuid> {
        match self {
            CompanyResolution::AlreadyId(id) | CompanyResolution::ResolvedFromName(id) => Some(id),
            CompanyResolution::NotFound => None,
        }
    }
}
