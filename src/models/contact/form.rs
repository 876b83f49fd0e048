use serde::Deserialize;

use crate::forms::{self, EntityForm};
use super::types::ContactPayload;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "linkedIn")]
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub birthday: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_vip: bool,
    pub email_opt_in: bool,
    pub sms_opt_in: bool,
    pub preferred_contact: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
}

impl EntityForm for ContactForm {
    type Payload = ContactPayload;

    fn required_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if forms::is_blank(&self.first_name) {
            errors.push(forms::missing("First name"));
        }
        if forms::is_blank(&self.last_name) {
            errors.push(forms::missing("Last name"));
        }
        if forms::is_blank(&self.email) {
            errors.push(forms::missing("Email"));
        }
        errors
    }

    fn into_payload(self) -> Result<ContactPayload, Vec<String>> {
        let mut errors = Vec::new();
        let birthday = forms::date(self.birthday.as_deref(), "Birthday", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            company_name: forms::text(self.company),
            title: forms::text(self.title),
            department: forms::text(self.department),
            email: forms::text(Some(self.email)),
            phone: forms::text(self.phone),
            mobile: forms::text(self.mobile),
            website: forms::text(self.website),
            linkedin: forms::text(self.linkedin),
            twitter: forms::text(self.twitter),
            address: forms::text(self.address),
            city: forms::text(self.city),
            state: forms::text(self.state),
            zip_code: forms::text(self.zip_code),
            country: forms::text(self.country),
            birthday,
            notes: forms::text(self.notes),
            tags: forms::string_set(self.tags),
            is_vip: self.is_vip,
            email_opt_in: self.email_opt_in,
            sms_opt_in: self.sms_opt_in,
            preferred_contact: forms::text(self.preferred_contact),
            timezone: forms::text(self.timezone),
            language: forms::text(self.language),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_last_and_email_are_required() {
        let form = ContactForm { first_name: "Ada".into(), ..ContactForm::default() };
        assert_eq!(form.required_errors(), vec!["Last name is required", "Email is required"]);
    }

    #[test]
    fn linked_in_field_name_is_kept() {
        let form: ContactForm = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","linkedIn":"in/ada","isVip":true}"#,
        )
        .unwrap();
        let payload = form.into_payload().unwrap();
        assert_eq!(payload.linkedin.as_deref(), Some("in/ada"));
        assert!(payload.is_vip);
        assert!(payload.tags.is_empty());
    }
}
