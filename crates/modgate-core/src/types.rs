//! Core types for modgate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final disposition assigned to a piece of submitted content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    /// Awaiting a human review decision
    PendingReview,
    /// Accepted, visible to other users
    Approved,
    /// Declined by policy or by a reviewer
    Rejected,
    /// Hard-blocked, only reachable via the blacklist or an explicit
    /// policy action
    Blocked,
}

impl ContentStatus {
    /// Whether this status is a valid human review decision
    pub fn is_review_decision(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PendingReview => "PENDING_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Blocked => "BLOCKED",
        };
        f.write_str(s)
    }
}

/// Risk level attached to a policy or to an individual rule.
///
/// Ordered by severity: `Low < Medium < High`. The ordering is load-bearing
/// for tie resolution when several rules match at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Default disposition for content matched at this risk level.
    ///
    /// `Blocked` is never derived from a risk level; it requires an
    /// explicit action in the policy source.
    pub fn default_action(self) -> ContentStatus {
        match self {
            Self::Low => ContentStatus::Approved,
            Self::Medium => ContentStatus::PendingReview,
            Self::High => ContentStatus::Rejected,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// A stored content submission with its moderation outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier for this submission
    pub content_id: String,

    /// Identity of the submitter
    pub user_id: String,

    /// The submitted text
    pub text: String,

    /// Current disposition
    pub status: ContentStatus,

    /// When the submission was recorded
    pub created_at: DateTime<Utc>,

    /// When the disposition last changed
    pub updated_at: DateTime<Utc>,

    /// Traceable explanation for the current disposition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Reviewer who made the final call, if human-reviewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<String>,

    /// Free-form note left by the reviewer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
}

impl ContentItem {
    /// Create a freshly submitted item with the given disposition
    pub fn new(
        content_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
        status: ContentStatus,
        reason: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            content_id: content_id.into(),
            user_id: user_id.into(),
            text: text.into(),
            status,
            created_at: now,
            updated_at: now,
            reason: Some(reason.into()),
            reviewer_id: None,
            review_note: None,
        }
    }
}
