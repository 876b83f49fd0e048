use serde::Deserialize;

use crate::forms::{self, EntityForm, NumberInput};
use super::types::{DealPayload, Priority, Stage};

/// Deal editor state as the UI holds it (camelCase, everything loosely typed).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DealForm {
    pub title: String,
    pub description: Option<String>,
    pub value: Option<NumberInput>,
    pub currency: Option<String>,
    pub stage: Option<String>,
    pub probability: Option<i32>,
    pub priority: Option<String>,
    pub close_date: Option<String>,
    pub contact_id: Option<String>,
    pub company_id: Option<String>,
    pub assigned_to: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub deal_type: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub competitors: Option<Vec<String>>,
    pub next_steps: Option<String>,
    pub loss_reason: Option<String>,
    pub won_at: Option<String>,
}

impl EntityForm for DealForm {
    type Payload = DealPayload;

    fn required_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if forms::is_blank(&self.title) {
            errors.push(forms::missing("Title"));
        }
        if self.value.as_ref().is_none_or(NumberInput::is_blank) {
            errors.push(forms::missing("Value"));
        }
        if self.close_date.as_deref().is_none_or(forms::is_blank) {
            errors.push(forms::missing("Close date"));
        }
        errors
    }

    fn into_payload(self) -> Result<DealPayload, Vec<String>> {
        let mut errors = Vec::new();

        let stage = match forms::text(self.stage) {
            None => Stage::LeadIn,
            Some(raw) => Stage::parse(&raw).unwrap_or_else(|| {
                errors.push(format!("Unknown stage '{raw}'"));
                Stage::LeadIn
            }),
        };
        let priority = match forms::text(self.priority) {
            None => Priority::Medium,
            Some(raw) => Priority::parse(&raw).unwrap_or_else(|| {
                errors.push(format!("Unknown priority '{raw}'"));
                Priority::Medium
            }),
        };

        let value = forms::number(self.value.as_ref(), "Value", &mut errors);
        let close_date = forms::date(self.close_date.as_deref(), "Close date", &mut errors);
        let won_at = forms::date(self.won_at.as_deref(), "Won date", &mut errors);
        let contact_id = forms::reference(self.contact_id.as_deref(), "Contact", &mut errors);
        let company_id = forms::reference(self.company_id.as_deref(), "Company", &mut errors);
        let assigned_to = forms::reference(self.assigned_to.as_deref(), "Assignee", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DealPayload {
            title: self.title.trim().to_string(),
            description: forms::text(self.description),
            value,
            currency: forms::text(self.currency).unwrap_or_else(|| "USD".to_string()),
            stage,
            probability: self.probability.unwrap_or(20).clamp(0, 100),
            priority,
            close_date,
            contact_id,
            company_id,
            assigned_to,
            source: forms::text(self.source),
            deal_type: forms::text(self.deal_type),
            notes: forms::text(self.notes),
            tags: forms::string_set(self.tags),
            competitors: forms::string_set(self.competitors),
            next_steps: forms::text(self.next_steps),
            loss_reason: forms::text(self.loss_reason),
            won_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn acme() -> DealForm {
        DealForm {
            title: "Acme License".into(),
            value: Some(NumberInput::Number(45000.0)),
            currency: Some("USD".into()),
            stage: Some("lead-in".into()),
            close_date: Some("2024-12-01".into()),
            ..DealForm::default()
        }
    }

    #[test]
    fn required_fields_are_title_value_and_close_date() {
        let errors = DealForm::default().required_errors();
        assert_eq!(
            errors,
            vec!["Title is required", "Value is required", "Close date is required"]
        );
        assert!(acme().required_errors().is_empty());
    }

    #[test]
    fn blank_value_text_counts_as_missing() {
        let form = DealForm { value: Some(NumberInput::Text(" ".into())), ..acme() };
        assert_eq!(form.required_errors(), vec!["Value is required"]);
    }

    #[test]
    fn payload_applies_defaults() {
        let form = DealForm { currency: None, stage: None, ..acme() };
        let payload = form.into_payload().expect("payload");
        assert_eq!(payload.currency, "USD");
        assert_eq!(payload.stage, Stage::LeadIn);
        assert_eq!(payload.probability, 20);
        assert_eq!(payload.priority, Priority::Medium);
        assert!(payload.tags.is_empty());
        assert!(payload.competitors.is_empty());
        assert_eq!(payload.close_date, NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn probability_is_clamped() {
        let high = DealForm { probability: Some(140), ..acme() }.into_payload().unwrap();
        assert_eq!(high.probability, 100);
        let low = DealForm { probability: Some(-3), ..acme() }.into_payload().unwrap();
        assert_eq!(low.probability, 0);
    }

    #[test]
    fn non_numeric_value_fails_only_at_payload_time() {
        let form = DealForm { value: Some(NumberInput::Text("a lot".into())), ..acme() };
        assert!(form.required_errors().is_empty());
        let errors = form.into_payload().unwrap_err();
        assert_eq!(errors, vec!["Value must be a number"]);
    }

    #[test]
    fn unknown_stage_is_rejected() {
        let form = DealForm { stage: Some("closed".into()), ..acme() };
        assert_eq!(form.into_payload().unwrap_err(), vec!["Unknown stage 'closed'"]);
    }

    #[test]
    fn camel_case_json_deserializes() {
        let form: DealForm = serde_json::from_str(
            r#"{"title":"Acme License","value":"45000","closeDate":"2024-12-01","nextSteps":"Call","type":"new-business"}"#,
        )
        .unwrap();
        assert_eq!(form.next_steps.as_deref(), Some("Call"));
        assert_eq!(form.deal_type.as_deref(), Some("new-business"));
        assert_eq!(form.into_payload().unwrap().value, Some(45000.0));
    }
}
