mod form;
mod queries;
mod types;

pub use form::ContactForm;
pub use queries::*;
pub use types::*;
