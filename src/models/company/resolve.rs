use uuid::Uuid;

use crate::store::{RecordStore, StoreResult};
use super::types::CompanyResolution;

/// Canonical hyphenated UUID, versions 1-5, RFC 4122 variant, either case.
///
/// Only the 36-character form counts; simple, braced and URN spellings are
/// treated as company display names.
pub fn parse_company_id(raw: &str) -> Option<Uuid> {
    if raw.len() != 36 {
        return None;
    }
    let id = Uuid::try_parse(raw).ok()?;
    let versioned = (1..=5).contains(&id.get_version_num());
    (versioned && id.get_variant() == uuid::Variant::RFC4122).then_some(id)
}

pub fn looks_like_company_id(raw: &str) -> bool {
    parse_company_id(raw).is_some()
}

/// Map a user's stored company scalar (an id or a name) to a companies row id.
pub async fn resolve_company_id(store: &dyn RecordStore, raw: &str) -> StoreResult<CompanyResolution> {
    if let Some(id) = parse_company_id(raw) {
        return Ok(CompanyResolution::AlreadyId(id));
    }
    Ok(match store.find_company_id_by_name(raw).await? {
        Some(id) => CompanyResolution::ResolvedFromName(id),
        None => CompanyResolution::NotFound,
    })
}
