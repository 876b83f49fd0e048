mod form;
mod queries;
mod types;

pub use form::LeadForm;
pub use queries::*;
pub use types::*;
