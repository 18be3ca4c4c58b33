//! Role-scoped access guard extractors for Axum handlers.
//!
//! Unlike a conventional 403 gate, the guard answers a wrong-role request
//! with a silent `303 See Other` to that caller's own role home, and an
//! unauthenticated request with a redirect to the sign-in view carrying the
//! originally requested location. The decision itself is the pure
//! `services::session::evaluate`; this module only resolves the session from
//! the bearer token and maps decisions onto HTTP.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::services::session::{self, GuardDecision, Identity, Session};
use crate::AppState;

/// Guard rejection: a redirect instruction, never an error body.
#[derive(Debug, Clone)]
pub struct GuardRedirect {
    location: String,
}

impl GuardRedirect {
    fn sign_in(from: &str) -> Self {
        Self {
            location: format!("/login?from={from}"),
        }
    }

    fn home(role: UserRole) -> Self {
        Self {
            location: role.home_path().to_string(),
        }
    }
}

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to(&self.location).into_response()
    }
}

/// Shared guard evaluation: resolve the session from the bearer token, then
/// apply the pure decision against the requested location.
async fn guard(
    parts: &mut Parts,
    state: &AppState,
    required_role: UserRole,
) -> Result<CurrentUser, GuardRedirect> {
    // Nested routers strip their prefix from `parts.uri`; the original
    // request URI lives in the OriginalUri extension.
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|OriginalUri(u)| u.clone())
        .unwrap_or_else(|| parts.uri.clone());
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    // An absent or invalid token resolves to an anonymous session; HTTP
    // requests never carry an unresolved (Loading) session.
    let Ok(user) = CurrentUser::from_request_parts(parts, state).await else {
        return Err(GuardRedirect::sign_in(&requested));
    };

    let session = Session::Authenticated {
        identity: Identity {
            id: user.id,
            username: user.username.clone(),
        },
        role: user.role,
    };

    match session::evaluate(&session, Some(required_role), &requested) {
        GuardDecision::Allow => Ok(user),
        GuardDecision::RedirectToHome(role) => Err(GuardRedirect::home(role)),
        GuardDecision::RedirectToSignIn { from } => Err(GuardRedirect::sign_in(&from)),
        GuardDecision::Loading => Err(GuardRedirect::sign_in(&requested)),
    }
}

/// Extractor that requires the admin role, relocating everyone else.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, UserRole::Admin).await.map(RequireAdmin)
    }
}

/// Extractor that requires the user role, relocating admins to their home.
#[derive(Debug, Clone)]
pub struct RequireUser(pub CurrentUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = GuardRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard(parts, state, UserRole::User).await.map(RequireUser)
    }
}
