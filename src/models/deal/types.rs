use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sales-pipeline stage, in board display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    LeadIn,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::LeadIn,
        Stage::Contacted,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Won,
        Stage::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::LeadIn => "lead-in",
            Stage::Contacted => "contacted",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::Won => "won",
            Stage::Lost => "lost",
        }
    }

    /// Column heading on the pipeline board.
    pub fn title(self) -> &'static str {
        match self {
            Stage::LeadIn => "Lead In",
            Stage::Contacted => "Contacted",
            Stage::Qualified => "Qualified",
            Stage::Proposal => "Proposal Sent",
            Stage::Negotiation => "Negotiation",
            Stage::Won => "Won",
            Stage::Lost => "Lost",
        }
    }

    pub fn parse(raw: &str) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(raw: &str) -> Option<Priority> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

/// A sales opportunity as stored. `stage` stays raw text so rows holding an
/// unknown stage can still be read (the board leaves them out).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deal {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub currency: String,
    pub stage: String,
    pub probability: i32,
    pub priority: String,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub deal_type: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub competitors: Vec<String>,
    pub next_steps: Option<String>,
    pub loss_reason: Option<String>,
    pub won_at: Option<NaiveDate>,
    pub created_by: Uuid,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    pub fn stage(&self) -> Option<Stage> {
        Stage::parse(&self.stage)
    }

    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.probability > 0 && self.probability < 100
    }
}

/// Storage-shaped write payload produced by the deal form.
#[derive(Debug, Clone, PartialEq)]
pub struct DealPayload {
    pub title: String,
    pub description: Option<String>,
    pub value: Option<f64>,
    pub currency: String,
    pub stage: Stage,
    pub probability: i32,
    pub priority: Priority,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub source: Option<String>,
    pub deal_type: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub competitors: Vec<String>,
    pub next_steps: Option<String>,
    pub loss_reason: Option<String>,
    pub won_at: Option<NaiveDate>,
}

impl DealPayload {
    /// Minimal payload with every optional field unset.
    pub fn new(title: &str, stage: Stage) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            value: None,
            currency: "USD".to_string(),
            stage,
            probability: 20,
            priority: Priority::Medium,
            close_date: None,
            contact_id: None,
            company_id: None,
            assigned_to: None,
            source: None,
            deal_type: None,
            notes: None,
            tags: Vec::new(),
            competitors: Vec::new(),
            next_steps: None,
            loss_reason: None,
            won_at: None,
        }
    }
}

/// Value and win date of a won deal, for the revenue trend.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WonDeal {
    pub value: Option<f64>,
    pub won_on: Option<NaiveDate>,
}
