//! Rule definitions and predicate evaluation
//!
//! Rules are closed tagged variants dispatched by an explicit `type` field:
//! keyword match, identity match, and boolean AND/OR composition. A rule is a
//! pure predicate over `(text, identity)` and never errors at evaluation
//! time; structurally invalid rules are rejected when the policy source is
//! loaded.

use modgate_core::RiskLevel;
use serde::{Deserialize, Serialize};

/// How a keyword rule combines its keyword tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Match if any keyword is present
    #[default]
    Any,
    /// Match only if every keyword is present
    All,
}

/// Operator for composite rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOperator {
    And,
    Or,
}

/// A matching condition over `(text, identity)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Case-insensitive substring match against the submitted text
    Keyword {
        /// Keywords to look for
        keywords: Vec<String>,

        /// ANY (default) or ALL combination
        #[serde(default)]
        match_mode: MatchMode,

        /// Optional per-rule severity, used when the owning policy does
        /// not pin one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        risk_level: Option<RiskLevel>,
    },

    /// Match against the submitter's identity
    Identity {
        /// Identities matched exactly
        #[serde(default)]
        exact_ids: Vec<String>,

        /// Identity prefixes, checked in declaration order
        #[serde(default)]
        prefixes: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        risk_level: Option<RiskLevel>,
    },

    /// Boolean AND/OR combination of child rules
    Composite {
        /// Logic operator
        operator: CompositeOperator,

        /// Sub-rules, evaluated in declaration order
        children: Vec<Rule>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        risk_level: Option<RiskLevel>,
    },
}

/// What a matching rule reported back, for tracing and severity resolution
#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetail {
    /// Human-readable description of the matched condition
    pub description: String,

    /// Severity derived from the matched rule (or its matched children)
    pub risk_level: Option<RiskLevel>,
}

impl Rule {
    /// Evaluate this rule against a submission.
    ///
    /// Returns `Some(MatchDetail)` on a match, `None` otherwise. "No match"
    /// is a normal valued result, never an error.
    pub fn evaluate(&self, text: &str, user_id: &str) -> Option<MatchDetail> {
        match self {
            Rule::Keyword {
                keywords,
                match_mode,
                risk_level,
            } => evaluate_keyword(keywords, *match_mode, *risk_level, text),
            Rule::Identity {
                exact_ids,
                prefixes,
                risk_level,
            } => evaluate_identity(exact_ids, prefixes, *risk_level, user_id),
            Rule::Composite {
                operator,
                children,
                risk_level,
            } => evaluate_composite(*operator, children, *risk_level, text, user_id),
        }
    }
}

fn evaluate_keyword(
    keywords: &[String],
    match_mode: MatchMode,
    risk_level: Option<RiskLevel>,
    text: &str,
) -> Option<MatchDetail> {
    // An empty keyword list never matches, in either mode.
    if keywords.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    let matched: Vec<&str> = keywords
        .iter()
        .filter(|kw| lower.contains(&kw.to_lowercase()))
        .map(String::as_str)
        .collect();

    let hit = match match_mode {
        MatchMode::Any => !matched.is_empty(),
        MatchMode::All => matched.len() == keywords.len(),
    };

    if hit {
        Some(MatchDetail {
            description: format!("keyword match: {}", matched.join(", ")),
            risk_level,
        })
    } else {
        None
    }
}

fn evaluate_identity(
    exact_ids: &[String],
    prefixes: &[String],
    risk_level: Option<RiskLevel>,
    user_id: &str,
) -> Option<MatchDetail> {
    if exact_ids.iter().any(|id| id == user_id) {
        return Some(MatchDetail {
            description: format!("identity match: {}", user_id),
            risk_level,
        });
    }

    if let Some(prefix) = prefixes.iter().find(|p| user_id.starts_with(p.as_str())) {
        return Some(MatchDetail {
            description: format!("identity prefix match: {}", prefix),
            risk_level,
        });
    }

    None
}

fn evaluate_composite(
    operator: CompositeOperator,
    children: &[Rule],
    risk_level: Option<RiskLevel>,
    text: &str,
    user_id: &str,
) -> Option<MatchDetail> {
    match operator {
        CompositeOperator::And => {
            // A zero-child AND is defined false: a moderation gate must not
            // fire on a vacuous condition.
            if children.is_empty() {
                return None;
            }

            let mut details = Vec::with_capacity(children.len());
            for child in children {
                details.push(child.evaluate(text, user_id)?);
            }

            let descriptions: Vec<&str> =
                details.iter().map(|d| d.description.as_str()).collect();
            Some(MatchDetail {
                description: format!("AND({})", descriptions.join("; ")),
                risk_level: risk_level.or_else(|| highest_severity(&details)),
            })
        }
        CompositeOperator::Or => {
            let matched: Vec<MatchDetail> = children
                .iter()
                .filter_map(|child| child.evaluate(text, user_id))
                .collect();

            let first = matched.first()?;
            Some(MatchDetail {
                description: format!("OR({})", first.description),
                risk_level: risk_level.or_else(|| highest_severity(&matched)),
            })
        }
    }
}

/// Pick the highest severity among matched children.
///
/// Ties resolve to the earliest child in declaration order; children without
/// a severity are ignored. Strict `>` keeps the scan stable.
fn highest_severity(details: &[MatchDetail]) -> Option<RiskLevel> {
    let mut best: Option<RiskLevel> = None;
    for detail in details {
        if let Some(risk) = detail.risk_level {
            if best.map_or(true, |b| risk > b) {
                best = Some(risk);
            }
        }
    }
    best
}
