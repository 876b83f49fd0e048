pub mod activity;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod deal;
pub mod invite;
pub mod lead;
pub mod task;
pub mod user;
