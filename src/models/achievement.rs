//! Gamification records: stored badge rows and the fixed achievement catalog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Stored achievement row. One row per earned badge; `streak_days` and
/// `xp_points` accumulate alongside the badge grant.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserAchievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub streak_days: i32,
    pub xp_points: i32,
    pub badge_name: String,
    pub earned_at: DateTime<Utc>,
}

/// One entry of the fixed 6-entry achievement catalog, with its computed
/// earned flag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Achievement {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub earned: bool,
}
