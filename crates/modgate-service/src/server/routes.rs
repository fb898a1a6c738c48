use crate::error::ApiError;
use crate::models::{
    BlacklistView, ConfigView, KeywordRequest, PolicySummary, QueueView, ReloadResponse,
    ReviewDecisionRequest, ReviewDecisionResponse, SubmitContentRequest, SubmitContentResponse,
    MAX_NOTE_CHARS, MAX_TEXT_CHARS,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use modgate_core::{ContentItem, Error};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Configuration endpoints
// ============================================================================

pub async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ConfigView {
        policy_enabled: state.engine.is_enabled(),
        policies_count: state.engine.policy_count(),
        blacklist_keywords: state.blacklist.len(),
    })
}

// ============================================================================
// Policy endpoints
// ============================================================================

pub async fn list_policies(State(state): State<AppState>) -> impl IntoResponse {
    let set = state.engine.snapshot();
    let policies: Vec<PolicySummary> = set
        .policies
        .iter()
        .map(|p| PolicySummary {
            id: p.id.clone(),
            name: p.name.clone(),
            risk_level: p.risk_level,
            action: p.action,
        })
        .collect();
    Json(policies)
}

pub async fn reload_policies(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.engine.reload()?;
    info!(
        policies = state.engine.policy_count(),
        "Policy set reloaded"
    );
    Ok(Json(ReloadResponse {
        policy_enabled: state.engine.is_enabled(),
        policies_count: state.engine.policy_count(),
    }))
}

// ============================================================================
// Blacklist endpoints
// ============================================================================

pub async fn list_blacklist(State(state): State<AppState>) -> impl IntoResponse {
    Json(BlacklistView {
        added: None,
        removed: None,
        keywords: state.blacklist.keywords(),
    })
}

pub async fn add_blacklist_keyword(
    State(state): State<AppState>,
    Json(req): Json<KeywordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let added = state.blacklist.add(&req.keyword)?;
    Ok(Json(BlacklistView {
        added: Some(added),
        removed: None,
        keywords: state.blacklist.keywords(),
    }))
}

pub async fn remove_blacklist_keyword(
    State(state): State<AppState>,
    Json(req): Json<KeywordRequest>,
) -> impl IntoResponse {
    let removed = state.blacklist.remove(&req.keyword);
    Json(BlacklistView {
        added: None,
        removed: Some(removed),
        keywords: state.blacklist.keywords(),
    })
}

// ============================================================================
// Content endpoints
// ============================================================================

pub async fn submit_content(
    State(state): State<AppState>,
    Json(req): Json<SubmitContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = req.user_id.trim();
    let text = req.text.trim();

    if user_id.is_empty() {
        return Err(Error::validation("user_id cannot be empty").into());
    }
    if text.is_empty() {
        return Err(Error::validation("text cannot be empty").into());
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(Error::validation(format!(
            "text exceeds {} characters",
            MAX_TEXT_CHARS
        ))
        .into());
    }

    let decision = state.gatekeeper().decide(user_id, text);
    let content_id = Uuid::new_v4().to_string();

    info!(
        content_id = %content_id,
        status = %decision.status,
        "Content submitted"
    );

    let item = ContentItem::new(&content_id, user_id, text, decision.status, &decision.reason);
    state.store.insert(item);

    Ok(Json(SubmitContentResponse {
        content_id,
        status: decision.status,
        reason: Some(decision.reason),
    }))
}

pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.store.get(&content_id)?;
    Ok(Json(item))
}

// ============================================================================
// Review endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueueParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

pub async fn get_review_queue(
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.store.queue_page(params.limit)?;
    Ok(Json(QueueView {
        count: items.len(),
        items,
    }))
}

pub async fn review_content(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Json(req): Json<ReviewDecisionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.reviewer_id.trim().is_empty() {
        return Err(Error::validation("reviewer_id cannot be empty").into());
    }
    if let Some(note) = &req.note {
        if note.chars().count() > MAX_NOTE_CHARS {
            return Err(Error::validation(format!(
                "note exceeds {} characters",
                MAX_NOTE_CHARS
            ))
            .into());
        }
    }

    let item = state
        .store
        .review(&content_id, req.reviewer_id.trim(), req.decision, req.note)?;

    info!(
        content_id = %content_id,
        status = %item.status,
        reviewer = %req.reviewer_id,
        "Review decision recorded"
    );

    Ok(Json(ReviewDecisionResponse {
        content_id: item.content_id,
        status: item.status,
        reviewer_id: req.reviewer_id.trim().to_string(),
    }))
}
