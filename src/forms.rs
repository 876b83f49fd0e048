//! Form layer: flat UI form state in, storage payload out.
//!
//! Validation here is shallow. `required_errors` only checks that
//! a fixed subset of fields is non-empty; numbers, dates and references are
//! parsed when the payload is built, never earlier. A form that fails either
//! step never reaches the record store.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::deal::{Deal, DealForm};
use crate::store::{Owner, RecordStore};

/// A numeric form field that may arrive as a JSON number or as typed text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, NumberInput::Text(t) if t.trim().is_empty())
    }

    fn parse(&self) -> Option<f64> {
        match self {
            NumberInput::Number(n) => Some(*n),
            NumberInput::Text(t) => t.trim().replace(',', "").parse().ok(),
        }
    }
}

pub trait EntityForm {
    type Payload;

    /// Names of required fields left empty, as user-facing messages.
    fn required_errors(&self) -> Vec<String>;

    /// Parse and normalize into the storage payload.
    fn into_payload(self) -> Result<Self::Payload, Vec<String>>;
}

/// Run the required-field check, then build the payload.
pub fn prepare<F: EntityForm>(form: F) -> Result<F::Payload, AppError> {
    let missing = form.required_errors();
    if !missing.is_empty() {
        return Err(AppError::Validation(missing));
    }
    form.into_payload().map_err(AppError::Validation)
}

/// Validate, shape and insert a new deal owned by `owner`.
pub async fn submit_deal(store: &dyn RecordStore, owner: &Owner, form: DealForm) -> Result<Deal, AppError> {
    let payload = prepare(form)?;
    Ok(store.insert_deal(owner, &payload).await?)
}

/// Validate, shape and write an edit of one of `owner`'s deals.
pub async fn resubmit_deal(
    store: &dyn RecordStore,
    owner: &Owner,
    deal_id: Uuid,
    form: DealForm,
) -> Result<Deal, AppError> {
    let payload = prepare(form)?;
    store
        .update_deal(owner.user_id, deal_id, &payload)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn missing(label: &str) -> String {
    format!("{label} is required")
}

/// Trimmed text, `None` when empty.
pub(crate) fn text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Trimmed, de-duplicated, order-preserving string set. Unset becomes empty.
pub(crate) fn string_set(values: Option<Vec<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values.unwrap_or_default() {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; keeps only the UTC date.
pub(crate) fn date(value: Option<&str>, label: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.naive_utc().date()),
        Err(_) => {
            errors.push(format!("{label} must be a date (YYYY-MM-DD)"));
            None
        }
    }
}

pub(crate) fn number(value: Option<&NumberInput>, label: &str, errors: &mut Vec<String>) -> Option<f64> {
    let input = value.filter(|v| !v.is_blank())?;
    match input.parse() {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            errors.push(format!("{label} must be a number"));
            None
        }
    }
}

pub(crate) fn reference(value: Option<&str>, label: &str, errors: &mut Vec<String>) -> Option<Uuid> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(format!("{label} must be a valid id"));
            None
        }
    }
}
