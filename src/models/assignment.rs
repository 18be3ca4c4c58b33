//! Assignment status: the lifecycle of one task assigned to one user.

use serde::{Deserialize, Serialize};

/// Assignment lifecycle status. The aggregators only ever branch on
/// `Completed`, `InProgress`, and `Submitted`; anything else displays as
/// pending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Submitted,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&AssignmentStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&AssignmentStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
