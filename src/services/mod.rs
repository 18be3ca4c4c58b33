//! Business logic services.

pub mod admin_stats;
pub mod auth;
pub mod session;
pub mod snapshot;
pub mod user_stats;
