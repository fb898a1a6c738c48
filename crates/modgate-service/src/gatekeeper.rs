//! Decision resolver
//!
//! Composes the policy engine, the blacklist, and the manual-review default
//! into one disposition. Three ordered strategies, each a fallback of the
//! previous; policy always takes precedence over the blacklist, which is a
//! safety net rather than a co-equal check.

use modgate_core::ContentStatus;
use modgate_policy::PolicyEngine;
use std::sync::Arc;
use tracing::debug;

use crate::blacklist::Blacklist;

/// A resolved disposition with its traceable reason
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub status: ContentStatus,
    pub reason: String,
}

/// Resolves submissions into dispositions
#[derive(Clone)]
pub struct Gatekeeper {
    engine: Arc<PolicyEngine>,
    blacklist: Arc<Blacklist>,
}

impl Gatekeeper {
    pub fn new(engine: Arc<PolicyEngine>, blacklist: Arc<Blacklist>) -> Self {
        Self { engine, blacklist }
    }

    /// Decide the disposition for a submission.
    ///
    /// 1. A policy engine match is final.
    /// 2. Otherwise the first blacklisted keyword blocks the content.
    /// 3. Otherwise the content goes to manual review.
    pub fn decide(&self, user_id: &str, text: &str) -> Decision {
        if let Some(outcome) = self.engine.evaluate(text, user_id) {
            debug!(
                policy = %outcome.policy_id,
                action = %outcome.action,
                "Policy engine decided disposition"
            );
            return Decision {
                status: outcome.action,
                reason: format!("Policy decision: {}", outcome.reason),
            };
        }

        if let Some(keyword) = self.blacklist.scan(text) {
            debug!(keyword = %keyword, "Blacklist blocked submission");
            return Decision {
                status: ContentStatus::Blocked,
                reason: format!("Blacklisted keyword hit: {}", keyword),
            };
        }

        Decision {
            status: ContentStatus::PendingReview,
            reason: "Requires manual review".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modgate_policy::PolicySet;

    fn gatekeeper_with(policies: &str) -> Gatekeeper {
        let engine = PolicyEngine::disabled();
        if !policies.is_empty() {
            engine.install(PolicySet::from_yaml(policies).unwrap());
        }
        Gatekeeper::new(Arc::new(engine), Arc::new(Blacklist::with_defaults()))
    }

    #[test]
    fn test_policy_precedes_blacklist() {
        // A policy approving "spam" for one specific identity must beat the
        // blacklist entry for the same word.
        let gatekeeper = gatekeeper_with(
            r#"
policies:
  - id: spam-ok-for-vendor
    name: Vendor spam exemption
    risk_level: LOW
    condition:
      type: composite
      operator: and
      children:
        - type: keyword
          keywords: ["spam"]
        - type: identity
          exact_ids: ["vendor1"]
"#,
        );

        let decision = gatekeeper.decide("vendor1", "this mentions spam");
        assert_eq!(decision.status, ContentStatus::Approved);
        assert!(decision.reason.starts_with("Policy decision: "));

        // A different identity falls through to the blacklist.
        let decision = gatekeeper.decide("someone", "this mentions spam");
        assert_eq!(decision.status, ContentStatus::Blocked);
        assert_eq!(decision.reason, "Blacklisted keyword hit: spam");
    }

    #[test]
    fn test_default_is_manual_review() {
        let gatekeeper = gatekeeper_with("");
        let decision = gatekeeper.decide("u1", "ordinary text");
        assert_eq!(decision.status, ContentStatus::PendingReview);
        assert_eq!(decision.reason, "Requires manual review");
    }

    #[test]
    fn test_disabled_engine_falls_through() {
        let gatekeeper = gatekeeper_with("");
        let decision = gatekeeper.decide("u1", "clearly a scam offer");
        assert_eq!(decision.status, ContentStatus::Blocked);
        assert_eq!(decision.reason, "Blacklisted keyword hit: scam");
    }

    #[test]
    fn test_determinism() {
        let gatekeeper = gatekeeper_with(
            r#"
policies:
  - id: p1
    name: One
    risk_level: MEDIUM
    condition:
      type: keyword
      keywords: ["review me"]
"#,
        );
        let a = gatekeeper.decide("u1", "please review me");
        let b = gatekeeper.decide("u1", "please review me");
        assert_eq!(a, b);
    }
}
