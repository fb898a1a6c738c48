//! Policy and policy-set definitions
//!
//! A policy pairs one condition tree with one outcome. A policy set is the
//! ordered unit of loading: order is preserved exactly as declared, because
//! first-match evaluation makes declaration order a user-controlled priority
//! mechanism.

use modgate_core::{ContentStatus, Error, Result, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rule::{MatchDetail, Rule};

/// How the loader treats a policy that fails to deserialize (typically an
/// unknown rule `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leniency {
    /// Any undeserializable policy fails the whole load
    Strict,
    /// Drop only the offending policy, keep loading the rest
    #[default]
    DropPolicy,
}

/// A named moderation policy: one condition root, one outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier within one loaded set, used for tracing
    pub id: String,

    /// Human label, included in reasons
    pub name: String,

    /// Risk level this policy assigns to matched content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,

    /// Explicit disposition, overriding the risk-level default mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ContentStatus>,

    /// Root of the matching tree
    pub condition: Rule,

    /// Reason template, completed with match detail at evaluation time
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "policy matched".to_string()
}

/// A policy match with its resolved disposition
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyMatch {
    /// Resolved disposition
    pub action: ContentStatus,

    /// Effective risk level, when one was declared or derived
    pub risk_level: Option<RiskLevel>,

    /// Detail reported by the matched condition
    pub detail: MatchDetail,
}

impl Policy {
    /// Evaluate this policy's condition and resolve its outcome.
    pub fn evaluate(&self, text: &str, user_id: &str) -> Option<PolicyMatch> {
        let detail = self.condition.evaluate(text, user_id)?;

        // The policy's own risk level pins the severity; a composite-derived
        // one only fills the gap.
        let risk_level = self.risk_level.or(detail.risk_level);
        let action = self
            .action
            .or_else(|| risk_level.map(RiskLevel::default_action))
            // Unreachable for validated policies, which carry an action or
            // a risk level. Pending review is the conservative floor.
            .unwrap_or(ContentStatus::PendingReview);

        Some(PolicyMatch {
            action,
            risk_level,
            detail,
        })
    }

    /// Check the load-time invariants for a single policy.
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::load("policy id must not be empty"));
        }
        if self.action.is_none() && self.risk_level.is_none() {
            return Err(Error::load(format!(
                "policy '{}' declares neither an action nor a risk level",
                self.id
            )));
        }
        Ok(())
    }
}

/// An ordered set of policies, loaded atomically from one declarative source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PolicySet {
    /// Policies in declared order
    pub policies: Vec<Policy>,
}

/// Raw document shape: policies are kept as opaque values so one
/// undeserializable policy can be handled without failing the document.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    policies: Vec<serde_yaml::Value>,
}

impl PolicySet {
    /// An empty, disabled set: evaluation never matches
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a policy set from a YAML string with the default leniency
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_yaml_with(yaml, Leniency::default())
    }

    /// Load a policy set from a YAML string.
    ///
    /// A syntactically invalid document is fatal. A policy that fails to
    /// deserialize (unknown rule type) is handled per `leniency`. A policy
    /// that deserializes but violates the structural invariants (empty id,
    /// neither action nor risk level) always fails the load.
    pub fn from_yaml_with(yaml: &str, leniency: Leniency) -> Result<Self> {
        let raw: RawDocument = serde_yaml::from_str(yaml)
            .map_err(|e| Error::load(format!("invalid policy document: {}", e)))?;

        let mut policies = Vec::with_capacity(raw.policies.len());
        for (index, value) in raw.policies.into_iter().enumerate() {
            match serde_yaml::from_value::<Policy>(value) {
                Ok(policy) => {
                    policy.validate()?;
                    policies.push(policy);
                }
                Err(e) => match leniency {
                    Leniency::Strict => {
                        return Err(Error::load(format!(
                            "policy at index {} is invalid: {}",
                            index, e
                        )));
                    }
                    Leniency::DropPolicy => {
                        warn!(index, error = %e, "Dropping undeserializable policy");
                    }
                },
            }
        }

        let mut seen = std::collections::HashSet::new();
        for policy in &policies {
            if !seen.insert(policy.id.as_str()) {
                return Err(Error::load(format!("duplicate policy id: '{}'", policy.id)));
            }
        }

        Ok(Self { policies })
    }

    /// Load a policy set from a file
    pub fn from_file(path: impl AsRef<std::path::Path>, leniency: Leniency) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_with(&content, leniency)
    }

    /// Number of loaded policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the set is empty (the "feature off" state)
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
