use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::csrf::generate_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
}

impl InviteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
        }
    }
}

/// Team invitation. Tokens never expire; only `pending` invites can be redeemed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Invite {
    pub id: Uuid,
    pub email: String,
    pub company: Uuid,
    pub role: String,
    pub invited_by: Uuid,
    #[serde(skip_serializing)]
    pub token: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending.as_str()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvite {
    pub email: String,
    pub company: Uuid,
    pub role: String,
    pub invited_by: Uuid,
    pub token: String,
}

impl NewInvite {
    /// A pending invite with a fresh 32-byte hex token.
    pub fn issue(email: &str, company: Uuid, role: &str, invited_by: Uuid) -> Self {
        Self {
            email: email.trim().to_string(),
            company,
            role: role.to_string(),
            invited_by,
            token: generate_token(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InviteRequest {
    pub email: String,
    pub role: Option<String>,
}

impl InviteRequest {
    pub fn role(&self) -> &str {
        self.role.as_deref().map(str::trim).filter(|r| !r.is_empty()).unwrap_or("member")
    }
}
