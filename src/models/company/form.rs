use serde::Deserialize;
use serde_json::Value;

use crate::forms::{self, EntityForm};
use super::types::CompanyPayload;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyForm {
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
    pub tags: Option<Vec<String>>,
    pub social_media: Option<Value>,
}

impl EntityForm for CompanyForm {
    type Payload = CompanyPayload;

    fn required_errors(&self) -> Vec<String> {
        if forms::is_blank(&self.name) {
            vec![forms::missing("Company name")]
        } else {
            Vec::new()
        }
    }

    fn into_payload(self) -> Result<CompanyPayload, Vec<String>> {
        let social_media = match self.social_media {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(v @ Value::Object(_)) => v,
            Some(_) => return Err(vec!["Social media must be an object".to_string()]),
        };

        Ok(CompanyPayload {
            name: self.name.trim().to_string(),
            website: forms::text(self.website),
            industry: forms::text(self.industry),
            size: forms::text(self.size),
            revenue: forms::text(self.revenue),
            phone: forms::text(self.phone),
            email: forms::text(self.email),
            address: forms::text(self.address),
            city: forms::text(self.city),
            state: forms::text(self.state),
            zip_code: forms::text(self.zip_code),
            country: forms::text(self.country),
            description: forms::text(self.description),
            tags: forms::string_set(self.tags),
            social_media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn social_media_defaults_to_empty_object() {
        let form = CompanyForm { name: "Initech".into(), ..CompanyForm::default() };
        assert_eq!(form.into_payload().unwrap().social_media, json!({}));
    }

    #[test]
    fn social_media_must_be_an_object() {
        let form = CompanyForm { name: "Initech".into(), social_media: Some(json!(["x"])), ..CompanyForm::default() };
        assert!(form.into_payload().is_err());
    }
}
