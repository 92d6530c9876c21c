//! Closed enumerations used by the rule type system.
//!
//! Unknown values are rejected during deserialization, so the validator never
//! sees them.

use serde::{Deserialize, Serialize};

/// Pod Security Standards profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodSecurityLevel {
    Privileged,
    Baseline,
    Restricted,
}

/// What to do when a CEL parameter resource cannot be found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterNotFoundAction {
    Allow,
    Deny,
}

/// How a failing rule is reported by the admission pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureAction {
    Audit,
    Enforce,
}

/// Label selector requirement operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}
