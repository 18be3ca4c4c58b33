//! Dashboard routes: role-scoped aggregated statistics.
//!
//! Both handlers are infallible at the HTTP level: a degraded store shows up
//! in the overview's `degraded` list, not as a 5xx.

use axum::{extract::State, Json};

use crate::errors::ApiResponse;
use crate::middleware::guard::{RequireAdmin, RequireUser};
use crate::services::admin_stats::{self, AdminOverview};
use crate::services::user_stats::{self, UserOverview};
use crate::AppState;

/// GET /api/v1/dashboard/admin — admin overview: headline counters, recent
/// submissions, leaderboard.
pub async fn admin_overview(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<ApiResponse<AdminOverview>> {
    ApiResponse::success(admin_stats::get_overview(&state.db).await)
}

/// GET /api/v1/dashboard/me — the current identity's overview: counters,
/// task views, achievements.
pub async fn my_overview(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Json<ApiResponse<UserOverview>> {
    ApiResponse::success(user_stats::get_overview(&state.db, user.id).await)
}
