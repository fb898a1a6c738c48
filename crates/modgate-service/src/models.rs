//! Request/response models and service configuration

use modgate_core::{ContentItem, ContentStatus};
use modgate_policy::Leniency;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on submitted text length, enforced at the HTTP boundary
pub const MAX_TEXT_CHARS: usize = 5000;

/// Upper bound on review note length
pub const MAX_NOTE_CHARS: usize = 1000;

/// Service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Policy source file; `None` runs with the engine disabled
    pub policy_path: Option<PathBuf>,

    /// How the loader treats undeserializable policies
    pub leniency: Leniency,
}

/// Body of `POST /content/submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitContentRequest {
    pub user_id: String,
    pub text: String,
}

/// Response of `POST /content/submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitContentResponse {
    pub content_id: String,
    pub status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `POST /review/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecisionRequest {
    pub reviewer_id: String,
    /// Must be APPROVED or REJECTED
    pub decision: ContentStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Response of `POST /review/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecisionResponse {
    pub content_id: String,
    pub status: ContentStatus,
    pub reviewer_id: String,
}

/// Body of blacklist add/remove requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRequest {
    pub keyword: String,
}

/// Response of blacklist mutations and listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    pub keywords: Vec<String>,
}

/// Response of `GET /config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigView {
    pub policy_enabled: bool,
    pub policies_count: usize,
    pub blacklist_keywords: usize,
}

/// One entry of `GET /policies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<modgate_core::RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ContentStatus>,
}

/// Response of `POST /policies/reload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub policy_enabled: bool,
    pub policies_count: usize,
}

/// Response of `GET /review/queue`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueView {
    pub count: usize,
    pub items: Vec<ContentItem>,
}
