mod form;
mod queries;
mod types;

pub use form::DealForm;
pub use queries::*;
pub use types::*;
