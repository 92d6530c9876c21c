use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
    UnknownVariant,
}

/// Produced by `parse` when rule text cannot be deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Classification of a structural rule violation.
///
/// Every kind is terminal: the rule must be rejected and the path and message
/// surfaced to the policy author.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// None of the rule strategies is set.
    MissingVariant,
    /// More than one rule strategy is set.
    AmbiguousVariant,
    /// An anchor form not accepted at this validation site.
    DisallowedAnchor,
    /// A key that looks like an anchor but does not parse as one.
    MalformedAnchor,
    /// An anchor whose value has the wrong shape.
    InvalidAnchorValue,
    /// `anyPattern` is not an array of documents.
    DeserializationError,
    MissingIterationTarget,
    MissingExpression,
    MissingParamKindField,
    MissingParamRef,
    AmbiguousParamIdentifier,
    MissingParamIdentifier,
    MissingNotFoundAction,
    MissingParamKind,
    MissingAuditAnnotationField,
    /// Only one half of a restricted-field / values pair is set.
    IncompletePairing,
    /// A pattern or foreach tree is nested beyond the configured ceiling.
    NestingTooDeep,
}

/// Produced by `validate` for the first violation found in a rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind:?} at '{path}': {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Slash-delimited path to the offending field. Empty for the rule root.
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Combined error type for the `load` entry point.
#[derive(Clone, Debug, Error)]
pub enum RuleError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
