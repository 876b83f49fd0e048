//! Company-scoped dashboard aggregations. Each section is an independent read
//! with its own error slot: one failing section never blanks the others.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::activity::Activity;
use crate::models::deal::{Stage, WonDeal};
use crate::store::{RecordStore, StoreResult};

// ---------- Types ----------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_leads: i64,
    /// Deals currently in negotiation.
    pub active_deals: i64,
    /// Sum of won deal values.
    pub closed_sales: f64,
    pub tasks_due_today: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub name: &'static str,
    pub value: i64,
    pub color: &'static str,
}

/// Stages shown on the distribution chart. `qualified` is not charted.
pub const DISTRIBUTION_STAGES: [(Stage, &str, &str); 6] = [
    (Stage::LeadIn, "Lead In", "#3b82f6"),
    (Stage::Contacted, "Contacted", "#8b5cf6"),
    (Stage::Proposal, "Proposal", "#06b6d4"),
    (Stage::Negotiation, "Negotiation", "#10b981"),
    (Stage::Won, "Won", "#f59e0b"),
    (Stage::Lost, "Lost", "#ef4444"),
];

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRevenue {
    pub month: &'static str,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub title: String,
    pub description: Option<String>,
    pub time: String,
    pub user: String,
    pub avatar: String,
}

/// One dashboard section: its data, or the message explaining why it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section<T> {
    Data(T),
    Error(String),
}

impl<T> Section<T> {
    pub fn from_result(result: StoreResult<T>, message: &str) -> Self {
        match result {
            Ok(data) => Section::Data(data),
            Err(e) => {
                log::error!("{message} {e}");
                Section::Error(message.to_string())
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Data(d) => Some(d),
            Section::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Section::Data(_) => None,
            Section::Error(msg) => Some(msg),
        }
    }
}

pub const OVERVIEW_ERROR: &str = "Failed to load overview data.";
pub const PIPELINE_ERROR: &str = "Failed to load pipeline data.";
pub const REVENUE_ERROR: &str = "Failed to load revenue data.";
pub const ACTIVITY_ERROR: &str = "Failed to load activities.";

pub const RECENT_ACTIVITY_LIMIT: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub overview: Section<Overview>,
    pub pipeline: Section<Vec<StageCount>>,
    pub revenue: Section<Vec<MonthRevenue>>,
    pub activity: Section<Vec<ActivityEntry>>,
}

impl Dashboard {
    /// Every section replaced by the same message, e.g. when the user has no company.
    pub fn unavailable(message: &str) -> Self {
        Dashboard {
            overview: Section::Error(message.to_string()),
            pipeline: Section::Error(message.to_string()),
            revenue: Section::Error(message.to_string()),
            activity: Section::Error(message.to_string()),
        }
    }
}

// ---------- Queries ----------

pub async fn overview(store: &dyn RecordStore, company: &str, today: NaiveDate) -> StoreResult<Overview> {
    let (total_leads, active_deals, closed_sales, tasks_due_today) = tokio::try_join!(
        store.count_leads(company),
        store.count_deals_in_stage(company, Stage::Negotiation),
        store.sum_won_value(company),
        store.count_tasks_due(company, today),
    )?;
    Ok(Overview { total_leads, active_deals, closed_sales, tasks_due_today })
}

pub async fn pipeline_distribution(store: &dyn RecordStore, company: &str) -> StoreResult<Vec<StageCount>> {
    let mut counts = Vec::with_capacity(DISTRIBUTION_STAGES.len());
    for (stage, name, color) in DISTRIBUTION_STAGES {
        let value = store.count_deals_in_stage(company, stage).await?;
        counts.push(StageCount { stage, name, value, color });
    }
    Ok(counts)
}

pub async fn revenue_trend(store: &dyn RecordStore, company: &str) -> StoreResult<Vec<MonthRevenue>> {
    let won = store.won_deals(company).await?;
    Ok(revenue_by_month(&won))
}

/// Latest activities with assignee names resolved in a single batched lookup.
pub async fn recent_activity(
    store: &dyn RecordStore,
    company: &str,
    now: DateTime<Utc>,
) -> StoreResult<Vec<ActivityEntry>> {
    let activities = store.recent_activities(company, RECENT_ACTIVITY_LIMIT).await?;

    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = activities
        .iter()
        .filter_map(|a| a.assigned_to)
        .filter(|id| seen.insert(*id))
        .collect();
    let names: HashMap<Uuid, String> = if ids.is_empty() {
        HashMap::new()
    } else {
        store
            .find_user_names(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.full_name()))
            .collect()
    };

    Ok(activities.into_iter().map(|a| activity_entry(a, &names, now)).collect())
}

/// Every section, fetched concurrently, each with its own error slot.
pub async fn load(store: &dyn RecordStore, company: &str, now: DateTime<Utc>) -> Dashboard {
    let (overview, pipeline, revenue, activity) = tokio::join!(
        overview(store, company, now.date_naive()),
        pipeline_distribution(store, company),
        revenue_trend(store, company),
        recent_activity(store, company, now),
    );
    Dashboard {
        overview: Section::from_result(overview, OVERVIEW_ERROR),
        pipeline: Section::from_result(pipeline, PIPELINE_ERROR),
        revenue: Section::from_result(revenue, REVENUE_ERROR),
        activity: Section::from_result(activity, ACTIVITY_ERROR),
    }
}

// ---------- Helpers ----------

/// Fixed Jan..Dec axis. Deals with no win date are skipped; years are merged.
pub fn revenue_by_month(won: &[WonDeal]) -> Vec<MonthRevenue> {
    let mut totals = [0.0_f64; 12];
    for deal in won {
        if let Some(day) = deal.won_on {
            totals[day.month0() as usize] += deal.value.unwrap_or(0.0);
        }
    }
    MONTHS
        .into_iter()
        .zip(totals)
        .map(|(month, revenue)| MonthRevenue { month, revenue })
        .collect()
}

pub fn time_ago(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(then) = then else {
        return "-".to_string();
    };
    let secs = (now - then).num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{s} seconds ago"),
        s if s < 3_600 => format!("{} minutes ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3_600),
        s => format!("{} days ago", s / 86_400),
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

fn activity_entry(a: Activity, names: &HashMap<Uuid, String>, now: DateTime<Utc>) -> ActivityEntry {
    let name = a.assigned_to.and_then(|id| names.get(&id)).filter(|n| !n.is_empty());
    let (user, avatar) = match name {
        Some(n) => (n.clone(), initials(n)),
        None => ("-".to_string(), "U".to_string()),
    };
    ActivityEntry {
        id: a.id,
        activity_type: a.activity_type,
        title: a.title,
        description: a.description,
        time: time_ago(Some(a.created_at), now),
        user,
        avatar,
    }
}
