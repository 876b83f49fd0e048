mod form;
mod queries;
mod types;

pub use form::TaskForm;
pub use queries::*;
pub use types::*;
