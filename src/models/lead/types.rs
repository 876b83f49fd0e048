use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub estimated_value: Option<f64>,
    pub expected_close_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub source: Option<String>,
    pub status: String,
    pub estimated_value: Option<f64>,
    pub expected_close_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

/// List filter for the leads page. Unset or `all` means no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(term) = active(&self.search) {
            let term = term.to_lowercase();
            let hit = lead.full_name().to_lowercase().contains(&term)
                || lead.company_name.as_deref().unwrap_or("").to_lowercase().contains(&term)
                || lead.email.as_deref().unwrap_or("").to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if !lead.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }
        if let Some(source) = active(&self.source) {
            if !lead.source.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(source)) {
                return false;
            }
        }
        true
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(first: &str, status: &str, source: Option<&str>) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            first_name: first.into(),
            last_name: "Smith".into(),
            company_name: Some("Globex".into()),
            title: None,
            email: Some(format!("{}@globex.test", first.to_lowercase())),
            phone: None,
            website: None,
            source: source.map(String::from),
            status: status.into(),
            estimated_value: None,
            expected_close_date: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            country: None,
            notes: None,
            tags: Vec::new(),
            created_by: Uuid::new_v4(),
            company: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn all_is_no_filter() {
        let f = LeadFilter { status: Some("all".into()), source: Some("all".into()), search: None };
        assert!(f.matches(&lead("Hank", "qualified", None)));
    }

    #[test]
    fn filters_combine() {
        let f = LeadFilter {
            search: Some("globex".into()),
            status: Some("new".into()),
            source: Some("Website".into()),
        };
        assert!(f.matches(&lead("Hank", "new", Some("website"))));
        assert!(!f.matches(&lead("Hank", "contacted", Some("website"))));
        assert!(!f.matches(&lead("Hank", "new", None)));
    }
}
