//! Explicit session context and the pure access-guard decision.
//!
//! The session is threaded to the guard as a value rather than read from
//! ambient state: the HTTP layer builds a resolved `Session` from the bearer
//! token per request, while embedding callers (a UI shell holding an
//! unresolved credential refresh) may pass `Session::Loading`.

use uuid::Uuid;

use crate::models::user::UserRole;

/// The authenticated caller as supplied by the identity layer. Opaque id
/// plus the username carried in the token; richer profile data lives in the
/// `profiles` table and is never needed for access decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

/// Session context at the moment a protected view is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Credentials are still being resolved; no access decision can be made.
    Loading,
    /// No identity present.
    Anonymous,
    /// Resolved identity with its single role.
    Authenticated { identity: Identity, role: UserRole },
}

/// Outcome of evaluating the guard. Exactly one of four, evaluated once per
/// request; redirects are instructions to the surrounding navigation layer,
/// never owned-state mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render a loading placeholder, no navigation.
    Loading,
    /// Send the caller to the sign-in view, carrying the originally
    /// requested location so the sign-in flow can return them afterward.
    RedirectToSignIn { from: String },
    /// Wrong role for this area: silently relocate to the caller's own
    /// role home. Never an "access denied" page.
    RedirectToHome(UserRole),
    /// Render the protected view unchanged.
    Allow,
}

/// Evaluate the access guard for a protected view.
///
/// `required_role` of `None` means any authenticated identity may enter.
/// `requested_path` is carried into the sign-in redirect.
pub fn evaluate(
    session: &Session,
    required_role: Option<UserRole>,
    requested_path: &str,
) -> GuardDecision {
    match session {
        Session::Loading => GuardDecision::Loading,
        Session::Anonymous => GuardDecision::RedirectToSignIn {
            from: requested_path.to_string(),
        },
        Session::Authenticated { role, .. } => match required_role {
            Some(required) if required != *role => GuardDecision::RedirectToHome(*role),
            _ => GuardDecision::Allow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authed(role: UserRole) -> Session {
        Session::Authenticated {
            identity: Identity {
                id: Uuid::new_v4(),
                username: "sam".to_string(),
            },
            role,
        }
    }

    #[test]
    fn loading_always_wins() {
        // Loading short-circuits regardless of what a required role would say.
        assert_eq!(
            evaluate(&Session::Loading, None, "/dashboard"),
            GuardDecision::Loading
        );
        assert_eq!(
            evaluate(&Session::Loading, Some(UserRole::Admin), "/admin"),
            GuardDecision::Loading
        );
    }

    #[test]
    fn anonymous_redirects_to_sign_in_with_origin() {
        let decision = evaluate(&Session::Anonymous, None, "/dashboard?tab=tasks");
        assert_eq!(
            decision,
            GuardDecision::RedirectToSignIn {
                from: "/dashboard?tab=tasks".to_string()
            }
        );
    }

    #[test]
    fn wrong_role_is_silently_relocated_home() {
        // A user probing the admin area lands on the user home, never an error.
        let decision = evaluate(&authed(UserRole::User), Some(UserRole::Admin), "/admin");
        assert_eq!(decision, GuardDecision::RedirectToHome(UserRole::User));

        // And the reverse: an admin in the user area goes to the admin home.
        let decision = evaluate(&authed(UserRole::Admin), Some(UserRole::User), "/dashboard");
        assert_eq!(decision, GuardDecision::RedirectToHome(UserRole::Admin));
    }

    #[test]
    fn matching_role_is_allowed() {
        assert_eq!(
            evaluate(&authed(UserRole::Admin), Some(UserRole::Admin), "/admin"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn no_required_role_admits_any_identity() {
        assert_eq!(
            evaluate(&authed(UserRole::User), None, "/profile"),
            GuardDecision::Allow
        );
        assert_eq!(
            evaluate(&authed(UserRole::Admin), None, "/profile"),
            GuardDecision::Allow
        );
    }
}
