use serde::Deserialize;

use crate::forms::{self, EntityForm, NumberInput};
use super::types::LeadPayload;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadForm {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub estimated_value: Option<NumberInput>,
    pub expected_close_date: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl EntityForm for LeadForm {
    type Payload = LeadPayload;

    fn required_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if forms::is_blank(&self.first_name) {
            errors.push(forms::missing("First name"));
        }
        if forms::is_blank(&self.last_name) {
            errors.push(forms::missing("Last name"));
        }
        errors
    }

    fn into_payload(self) -> Result<LeadPayload, Vec<String>> {
        let mut errors = Vec::new();
        let estimated_value = forms::number(self.estimated_value.as_ref(), "Estimated value", &mut errors);
        let expected_close_date =
            forms::date(self.expected_close_date.as_deref(), "Expected close date", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company_name: forms::text(self.company),
            title: forms::text(self.title),
            email: forms::text(self.email),
            phone: forms::text(self.phone),
            website: forms::text(self.website),
            source: forms::text(self.source),
            status: forms::text(self.status).unwrap_or_else(|| "new".to_string()),
            estimated_value,
            expected_close_date,
            address: forms::text(self.address),
            city: forms::text(self.city),
            state: forms::text(self.state),
            zip_code: forms::text(self.zip_code),
            country: forms::text(self.country),
            notes: forms::text(self.notes),
            tags: forms::string_set(self.tags),
        })
    }
}
