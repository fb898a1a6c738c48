//! Policy evaluation engine
//!
//! Process-wide engine state with explicit reload semantics: one loaded
//! `PolicySet` shared by every evaluation, replaced wholesale on reload.
//! Readers always observe a single internally consistent set because the
//! engine swaps an `Arc` reference rather than mutating the set in place.

use modgate_core::{ContentStatus, Result, RiskLevel};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{info, warn};

use crate::policy::{Leniency, PolicySet};

/// Outcome of a policy match, carrying enough detail for tracing
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    /// Resolved disposition
    pub action: ContentStatus,

    /// Effective risk level, when declared or derived
    pub risk_level: Option<RiskLevel>,

    /// Id of the matching policy
    pub policy_id: String,

    /// Traceable reason referencing the policy and the matched condition
    pub reason: String,
}

struct EngineState {
    set: Arc<PolicySet>,
    source: Option<PathBuf>,
    /// Modification marker of the source at load time, for change detection
    modified: Option<SystemTime>,
}

/// Policy evaluation engine
pub struct PolicyEngine {
    state: RwLock<EngineState>,
    leniency: Leniency,
}

impl PolicyEngine {
    /// Create an engine with no policies loaded.
    ///
    /// A disabled engine returns no match for every input; the caller's
    /// fallback strategies apply.
    pub fn disabled() -> Self {
        Self {
            state: RwLock::new(EngineState {
                set: Arc::new(PolicySet::empty()),
                source: None,
                modified: None,
            }),
            leniency: Leniency::default(),
        }
    }

    /// Override the unknown-rule-type leniency
    pub fn with_leniency(mut self, leniency: Leniency) -> Self {
        self.leniency = leniency;
        self
    }

    /// Load (or reload) the policy set from a file, replacing the whole set
    /// atomically.
    ///
    /// A missing file is the explicit "feature off" state, not an error: the
    /// engine is disabled. A malformed file fails the call and keeps the
    /// previously loaded set.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.exists() {
            let mut state = self.state.write();
            state.set = Arc::new(PolicySet::empty());
            state.source = Some(path.to_path_buf());
            state.modified = None;
            info!(path = %path.display(), "Policy file not found; engine disabled");
            return Ok(());
        }

        let modified = std::fs::metadata(path)?.modified().ok();
        let set = PolicySet::from_file(path, self.leniency)?;

        let mut state = self.state.write();
        state.set = Arc::new(set);
        state.source = Some(path.to_path_buf());
        state.modified = modified;
        info!(
            path = %path.display(),
            policies = state.set.len(),
            "Loaded policy set"
        );
        Ok(())
    }

    /// Re-read the configured source, unconditionally
    pub fn reload(&self) -> Result<()> {
        let source = self.state.read().source.clone();
        match source {
            Some(path) => self.load_from_file(path),
            None => Ok(()),
        }
    }

    /// Re-read the configured source only if its modification marker moved.
    ///
    /// Returns whether a reload actually happened.
    pub fn reload_if_changed(&self) -> Result<bool> {
        let (source, loaded_at) = {
            let state = self.state.read();
            (state.source.clone(), state.modified)
        };
        let Some(path) = source else {
            return Ok(false);
        };

        let current = std::fs::metadata(&path)
            .ok()
            .and_then(|m| m.modified().ok());
        if current.is_some() && current == loaded_at {
            return Ok(false);
        }

        self.load_from_file(&path)?;
        Ok(true)
    }

    /// Evaluate a submission against the loaded policies, first match wins.
    ///
    /// Policies are consulted in declared order; the earliest one whose
    /// condition matches determines the outcome. Returns `None` when no
    /// policy matches or the engine is disabled.
    pub fn evaluate(&self, text: &str, user_id: &str) -> Option<PolicyOutcome> {
        let set = self.state.read().set.clone();
        if set.is_empty() {
            return None;
        }

        for policy in &set.policies {
            if let Some(matched) = policy.evaluate(text, user_id) {
                return Some(PolicyOutcome {
                    action: matched.action,
                    risk_level: matched.risk_level,
                    policy_id: policy.id.clone(),
                    reason: format!(
                        "policy:{} name:{} -> {} ({})",
                        policy.id, policy.name, policy.reason, matched.detail.description
                    ),
                });
            }
        }

        None
    }

    /// Whether any policies are loaded
    pub fn is_enabled(&self) -> bool {
        !self.state.read().set.is_empty()
    }

    /// Number of loaded policies
    pub fn policy_count(&self) -> usize {
        self.state.read().set.len()
    }

    /// Current policy set snapshot, for introspection endpoints
    pub fn snapshot(&self) -> Arc<PolicySet> {
        self.state.read().set.clone()
    }

    /// Replace the loaded set directly, mainly for tests and embedding
    pub fn install(&self, set: PolicySet) {
        let mut state = self.state.write();
        if set.is_empty() {
            warn!("Installing an empty policy set; engine disabled");
        }
        state.set = Arc::new(set);
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::disabled()
    }
}
