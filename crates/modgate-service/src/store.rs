//! In-memory content store and FIFO review queue
//!
//! Single-writer semantics: content items and the review queue live behind
//! one lock so a submission and its queue entry are recorded together.
//! Persistence is process lifetime only.

use chrono::Utc;
use modgate_core::{ContentItem, ContentStatus, Error, Result};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

struct StoreInner {
    contents: HashMap<String, ContentItem>,
    queue: VecDeque<String>,
}

/// Stored submissions plus the pending-review queue
pub struct ContentStore {
    inner: RwLock<StoreInner>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                contents: HashMap::new(),
                queue: VecDeque::new(),
            }),
        }
    }

    /// Record a freshly decided submission. Items dispositioned
    /// PENDING_REVIEW join the tail of the review queue.
    pub fn insert(&self, item: ContentItem) {
        let mut inner = self.inner.write();
        if item.status == ContentStatus::PendingReview {
            inner.queue.push_back(item.content_id.clone());
        }
        inner.contents.insert(item.content_id.clone(), item);
    }

    /// Fetch a content item by id
    pub fn get(&self, content_id: &str) -> Result<ContentItem> {
        self.inner
            .read()
            .contents
            .get(content_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("content '{}' not found", content_id)))
    }

    /// First `limit` queued items, oldest first
    pub fn queue_page(&self, limit: usize) -> Result<Vec<ContentItem>> {
        if limit == 0 {
            return Err(Error::validation("limit must be > 0"));
        }

        let inner = self.inner.read();
        Ok(inner
            .queue
            .iter()
            .take(limit)
            .filter_map(|id| inner.contents.get(id).cloned())
            .collect())
    }

    /// Number of queued items
    pub fn queue_len(&self) -> usize {
        self.inner.read().queue.len()
    }

    /// Apply a human review decision.
    ///
    /// Fails with `NotFound` for an unknown id, `Conflict` when the item is
    /// not pending review (a second review must never silently succeed), and
    /// `Validation` for a decision other than APPROVED/REJECTED.
    pub fn review(
        &self,
        content_id: &str,
        reviewer_id: &str,
        decision: ContentStatus,
        note: Option<String>,
    ) -> Result<ContentItem> {
        let mut inner = self.inner.write();

        let updated = {
            let item = inner
                .contents
                .get_mut(content_id)
                .ok_or_else(|| Error::not_found(format!("content '{}' not found", content_id)))?;

            if item.status != ContentStatus::PendingReview {
                return Err(Error::conflict(format!(
                    "content status is {}, cannot review",
                    item.status
                )));
            }

            if !decision.is_review_decision() {
                return Err(Error::validation("decision must be APPROVED or REJECTED"));
            }

            item.status = decision;
            item.updated_at = Utc::now();
            item.reviewer_id = Some(reviewer_id.to_string());
            item.review_note = note;
            item.clone()
        };

        inner.queue.retain(|id| id != content_id);
        Ok(updated)
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
