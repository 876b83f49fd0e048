mod queries;
mod recorder;
mod types;

pub use queries::*;
pub use recorder::record;
pub use types::*;
