mod form;
mod queries;
mod resolve;
mod types;

pub use form::CompanyForm;
pub use queries::*;
pub use resolve::{looks_like_company_id, parse_company_id, resolve_company_id};
pub use types::*;
