//! Modgate Policy Engine
//!
//! Declarative rule-composition engine for content moderation decisions.
//!
//! Policies are defined in YAML and pair a condition tree (keyword match,
//! identity match, boolean AND/OR composition) with an outcome (risk level
//! or explicit disposition plus a reason template). Evaluation walks the
//! loaded policies in declared order and the first match wins, making source
//! order a user-controlled priority mechanism.

pub mod engine;
pub mod policy;
pub mod rule;

pub use engine::{PolicyEngine, PolicyOutcome};
pub use policy::{Leniency, Policy, PolicyMatch, PolicySet};
pub use rule::{CompositeOperator, MatchDetail, MatchMode, Rule};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{PolicyEngine, PolicyOutcome};
    pub use crate::policy::{Leniency, Policy, PolicyMatch, PolicySet};
    pub use crate::rule::{CompositeOperator, MatchDetail, MatchMode, Rule};
}
