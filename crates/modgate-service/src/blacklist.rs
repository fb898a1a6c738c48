//! Static keyword blacklist
//!
//! The safety net behind the policy engine: a flat, mutable list of
//! substrings that force BLOCKED when no policy intervenes. Mutation is rare
//! and administrator-triggered, so the list lives behind a copy-on-write
//! snapshot: readers scan one consistent automaton while a writer swaps in a
//! rebuilt one.

use aho_corasick::AhoCorasick;
use modgate_core::{Error, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Baseline keywords every fresh service starts with
const DEFAULT_KEYWORDS: [&str; 3] = ["spam", "scam", "illegal"];

struct Snapshot {
    /// Keywords in list order; order decides which hit wins
    keywords: Vec<String>,
    /// Automaton over the lowercased keywords; `None` when the list is empty
    automaton: Option<AhoCorasick>,
}

impl Snapshot {
    fn build(keywords: Vec<String>) -> Self {
        let automaton = if keywords.is_empty() {
            None
        } else {
            // Patterns are lowercased once here; scan input is lowercased in
            // `scan`, so non-ASCII keywords fold correctly too.
            let patterns: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
            AhoCorasick::new(&patterns).ok()
        };
        Self {
            keywords,
            automaton,
        }
    }
}

/// Mutable keyword blacklist with consistent concurrent scans
pub struct Blacklist {
    inner: RwLock<Arc<Snapshot>>,
}

impl Blacklist {
    /// Create a blacklist with the given keywords, preserving order
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(Snapshot::build(keywords))),
        }
    }

    /// Create a blacklist seeded with the baseline keywords
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect())
    }

    /// Scan text for the first blacklisted keyword, in list order.
    ///
    /// All occurrences are considered and the hit belonging to the
    /// earliest-listed keyword wins, independent of position in the text.
    pub fn scan(&self, text: &str) -> Option<String> {
        let snapshot = self.inner.read().clone();
        let automaton = snapshot.automaton.as_ref()?;

        let lower = text.to_lowercase();
        let winner = automaton
            .find_overlapping_iter(&lower)
            .map(|m| m.pattern().as_usize())
            .min()?;
        Some(snapshot.keywords[winner].clone())
    }

    /// Add a keyword. Idempotent: returns `false` without duplicating when
    /// an equivalent keyword is already listed.
    pub fn add(&self, keyword: &str) -> Result<bool> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(Error::validation("keyword cannot be empty"));
        }

        let mut inner = self.inner.write();
        if inner
            .keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(keyword))
        {
            return Ok(false);
        }

        let mut keywords = inner.keywords.clone();
        keywords.push(keyword.to_string());
        *inner = Arc::new(Snapshot::build(keywords));
        debug!(keyword, "Blacklist keyword added");
        Ok(true)
    }

    /// Remove a keyword, reporting whether it was present
    pub fn remove(&self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        let mut inner = self.inner.write();
        let before = inner.keywords.len();
        let keywords: Vec<String> = inner
            .keywords
            .iter()
            .filter(|k| !k.eq_ignore_ascii_case(keyword))
            .cloned()
            .collect();
        if keywords.len() == before {
            return false;
        }
        *inner = Arc::new(Snapshot::build(keywords));
        debug!(keyword, "Blacklist keyword removed");
        true
    }

    /// Current keywords in list order
    pub fn keywords(&self) -> Vec<String> {
        self.inner.read().keywords.clone()
    }

    /// Number of listed keywords
    pub fn len(&self) -> usize {
        self.inner.read().keywords.len()
    }

    /// Whether no keywords are listed
    pub fn is_empty(&self) -> bool {
        self.inner.read().keywords.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::with_defaults()
    }
}
