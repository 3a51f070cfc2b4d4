pub mod auth;
pub mod initialization;
pub mod tracing;
pub mod users;
