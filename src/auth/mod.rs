pub mod context;
pub mod csrf;
pub mod middleware;
pub mod password;
pub mod registration;
pub mod session;
pub mod validate;
