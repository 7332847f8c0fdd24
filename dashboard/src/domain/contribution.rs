//! Contribution records submitted against tasks.
//!
//! The review workflow has not been agreed yet: nothing in the stores creates
//! contributions, and the transition operations below refuse with
//! [`ErrorCode::Unsupported`](super::ErrorCode::Unsupported) instead of
//! guessing one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Error;
use super::ids::{ContributionId, TaskId};
use super::user::UserId;

/// Review state of a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by the client.
    Approved,
    /// Declined by the client.
    Rejected,
}

impl ContributionStatus {
    /// Parse the wire literal.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire literal for this status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ContributionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work a user submitted for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    id: ContributionId,
    task_id: TaskId,
    user_id: UserId,
    description: String,
    status: ContributionStatus,
    submitted_at: DateTime<Utc>,
}

impl Contribution {
    /// Build a pending contribution record.
    pub fn new(
        id: ContributionId,
        task_id: TaskId,
        user_id: UserId,
        description: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            description: description.into(),
            status: ContributionStatus::Pending,
            submitted_at,
        }
    }

    /// Contribution identifier.
    pub fn id(&self) -> ContributionId {
        self.id
    }

    /// Task the work was submitted for.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Submitting user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Free-text summary of the work.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Review state.
    pub fn status(&self) -> ContributionStatus {
        self.status
    }

    /// Submission timestamp.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Approve the contribution. Not available until a review workflow exists.
    pub fn approve(&mut self) -> Result<(), Error> {
        Err(Error::unsupported("contribution review is not available"))
    }

    /// Reject the contribution. Not available until a review workflow exists.
    pub fn reject(&mut self) -> Result<(), Error> {
        Err(Error::unsupported("contribution review is not available"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::rstest;
    use uuid::Uuid;

    fn pending() -> Contribution {
        let submitted_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Contribution::new(
            ContributionId::from_uuid(Uuid::from_u128(1)),
            TaskId::from_uuid(Uuid::from_u128(2)),
            UserId::random(),
            "Implemented the landing page",
            submitted_at,
        )
    }

    #[rstest]
    fn new_contributions_start_pending() {
        assert_eq!(pending().status(), ContributionStatus::Pending);
    }

    #[rstest]
    fn review_transitions_are_unsupported_and_leave_status() {
        let mut contribution = pending();
        let approve = contribution.approve().expect_err("unsupported");
        let reject = contribution.reject().expect_err("unsupported");

        assert_eq!(approve.code(), ErrorCode::Unsupported);
        assert_eq!(reject.code(), ErrorCode::Unsupported);
        assert_eq!(contribution.status(), ContributionStatus::Pending);
    }

    #[rstest]
    #[case("pending", Some(ContributionStatus::Pending))]
    #[case("approved", Some(ContributionStatus::Approved))]
    #[case("rejected", Some(ContributionStatus::Rejected))]
    #[case("merged", None)]
    fn status_parses_only_known_literals(
        #[case] raw: &str,
        #[case] expected: Option<ContributionStatus>,
    ) {
        assert_eq!(ContributionStatus::parse(raw), expected);
    }
}
