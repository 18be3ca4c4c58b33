//! Database models and DTOs for all domain entities.

pub mod achievement;
pub mod assignment;
pub mod user;
