//! Request extractors: authentication and the role-scoped access guard.

pub mod auth;
pub mod guard;
