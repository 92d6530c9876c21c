//! Structural validation of `validate` rules.
//!
//! Validation is fail-fast: the first violation is returned and nothing after
//! it is inspected. The rule is never modified.

use crate::error::{ValidationError, ValidationErrorKind};
use crate::options::ValidateOptions;
use crate::pattern::{join, validate_pattern};
use crate::types::*;
use serde_json::Value;

const RULE_MISSING: &str = "one of pattern, anyPattern, deny, foreach, cel must be specified";
const RULE_AMBIGUOUS: &str = "only one of pattern, anyPattern, deny, foreach, cel can be specified";
const FOREACH_MISSING: &str =
    "one of pattern, anyPattern, deny, or a nested foreach must be specified";
const FOREACH_AMBIGUOUS: &str =
    "only one of pattern, anyPattern, deny, or a nested foreach can be specified";
const PARAM_IDENTIFIER: &str = "one of cel.paramRef.name or cel.paramRef.selector must be set";

/// Validate a rule with [`ValidateOptions::default`].
pub fn validate(rule: &ValidateRule) -> Result<(), ValidationError> {
    Validator::default().validate(rule)
}

/// Rule validator bound to a set of options.
#[derive(Clone, Copy, Debug, Default)]
pub struct Validator {
    options: ValidateOptions,
}

impl Validator {
    pub fn new(options: ValidateOptions) -> Self {
        Validator { options }
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    /// Check that `rule` is well-formed.
    ///
    /// Runs the strategy exclusivity check first, then pattern, anyPattern,
    /// foreach, podSecurity and cel checks in that order.
    pub fn validate(&self, rule: &ValidateRule) -> Result<(), ValidationError> {
        let result = self.check_rule(rule);
        match &result {
            Ok(()) => tracing::trace!("validate rule accepted"),
            Err(err) => tracing::debug!(
                kind = ?err.kind,
                path = %err.path,
                message = %err.message,
                "validate rule rejected"
            ),
        }
        result
    }

    fn check_rule(&self, rule: &ValidateRule) -> Result<(), ValidationError> {
        require_exactly_one(&rule_variants(rule), "", RULE_MISSING, RULE_AMBIGUOUS)?;

        if let Some(pattern) = rule.pattern() {
            self.check_pattern(pattern, "pattern")?;
        }
        if let Some(any_pattern) = &rule.any_pattern {
            self.check_any_pattern(any_pattern, "anyPattern")?;
        }
        if let Some(foreach) = &rule.foreach {
            self.check_foreach(foreach, "foreach", 1)?;
        }
        if let Some(pod_security) = &rule.pod_security {
            check_pod_security(pod_security)?;
        }
        if let Some(cel) = &rule.cel {
            check_cel(cel)?;
        }
        Ok(())
    }

    fn check_pattern(&self, pattern: &Value, path: &str) -> Result<(), ValidationError> {
        validate_pattern(
            pattern,
            path,
            self.options.anchors,
            self.options.max_pattern_depth,
        )
    }

    fn check_any_pattern(
        &self,
        any_pattern: &AnyPattern,
        path: &str,
    ) -> Result<(), ValidationError> {
        let documents = any_pattern.documents().map_err(|e| {
            ValidationError::new(
                ValidationErrorKind::DeserializationError,
                path,
                format!("failed to deserialize anyPattern, expect array: {}", e),
            )
        })?;
        for (i, document) in documents.iter().enumerate() {
            self.check_pattern(document, &join(path, &i.to_string()))?;
        }
        Ok(())
    }

    // ─── foreach ────────────────────────────────────────────────────────────

    fn check_foreach(
        &self,
        entries: &[ForEachRule],
        path: &str,
        depth: usize,
    ) -> Result<(), ValidationError> {
        if depth > self.options.max_foreach_depth {
            tracing::warn!(
                path,
                max_depth = self.options.max_foreach_depth,
                "foreach nesting ceiling hit"
            );
            return Err(ValidationError::new(
                ValidationErrorKind::NestingTooDeep,
                path,
                format!(
                    "foreach nesting exceeds maximum depth of {}",
                    self.options.max_foreach_depth
                ),
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            let entry_path = join(path, &i.to_string());

            if entry.list.is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingIterationTarget,
                    join(&entry_path, "list"),
                    "foreach.list is required",
                ));
            }

            require_exactly_one(
                &foreach_variants(entry),
                &entry_path,
                FOREACH_MISSING,
                FOREACH_AMBIGUOUS,
            )?;

            if let Some(pattern) = entry.pattern() {
                self.check_pattern(pattern, &join(&entry_path, "pattern"))?;
            }
            if let Some(any_pattern) = &entry.any_pattern {
                self.check_any_pattern(any_pattern, &join(&entry_path, "anyPattern"))?;
            }
            if let Some(nested) = &entry.foreach {
                self.check_foreach(nested, &join(&entry_path, "foreach"), depth + 1)?;
            }
        }
        Ok(())
    }
}

// ─── Exclusivity ────────────────────────────────────────────────────────────

/// How many of a set of mutually exclusive fields are populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Missing,
    One,
    Ambiguous,
}

/// Classify a list of presence flags as none, exactly one, or several set.
pub fn exactly_one_of(present: &[bool]) -> Selection {
    match present.iter().filter(|&&p| p).count() {
        0 => Selection::Missing,
        1 => Selection::One,
        _ => Selection::Ambiguous,
    }
}

fn require_exactly_one(
    present: &[bool],
    path: &str,
    missing: &str,
    ambiguous: &str,
) -> Result<(), ValidationError> {
    match exactly_one_of(present) {
        Selection::One => Ok(()),
        Selection::Missing => Err(ValidationError::new(
            ValidationErrorKind::MissingVariant,
            path,
            missing,
        )),
        Selection::Ambiguous => Err(ValidationError::new(
            ValidationErrorKind::AmbiguousVariant,
            path,
            ambiguous,
        )),
    }
}

/// Presence of each rule strategy.
///
/// `foreach` counts even when empty, while `manifests` only counts once it
/// has attestors.
pub fn rule_variants(rule: &ValidateRule) -> [bool; 7] {
    [
        rule.pattern().is_some(),
        rule.any_pattern.is_some(),
        rule.deny.is_some(),
        rule.foreach.is_some(),
        rule.pod_security.is_some(),
        rule.cel.is_some(),
        rule.manifests
            .as_ref()
            .is_some_and(|m| !m.attestors.is_empty()),
    ]
}

/// Presence of each foreach strategy.
pub fn foreach_variants(entry: &ForEachRule) -> [bool; 4] {
    [
        entry.pattern().is_some(),
        entry.any_pattern.is_some(),
        entry.deny.is_some(),
        entry.foreach.is_some(),
    ]
}

// ─── podSecurity ────────────────────────────────────────────────────────────

fn check_pod_security(pod_security: &PodSecurity) -> Result<(), ValidationError> {
    for (i, exclude) in pod_security.exclude.iter().enumerate() {
        let path = format!("podSecurity/exclude/{}", i);
        if !exclude.restricted_field.is_empty() && exclude.values.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::IncompletePairing,
                join(&path, "values"),
                "podSecurity.exclude.values is required",
            ));
        }
        if exclude.restricted_field.is_empty() && !exclude.values.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::IncompletePairing,
                join(&path, "restrictedField"),
                "podSecurity.exclude.restrictedField is required",
            ));
        }
    }
    Ok(())
}

// ─── cel ────────────────────────────────────────────────────────────────────

fn check_cel(cel: &CelRule) -> Result<(), ValidationError> {
    for (i, expression) in cel.expressions.iter().enumerate() {
        if expression.expression.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingExpression,
                format!("cel/expressions/{}/expression", i),
                "cel.expressions.expression is required",
            ));
        }
    }

    if let Some(param_kind) = &cel.param_kind {
        if param_kind.api_version.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingParamKindField,
                "cel/paramKind/apiVersion",
                "cel.paramKind.apiVersion is required",
            ));
        }
        if param_kind.kind.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingParamKindField,
                "cel/paramKind/kind",
                "cel.paramKind.kind is required",
            ));
        }
        if cel.param_ref.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingParamRef,
                "cel/paramRef",
                "cel.paramRef is required",
            ));
        }
    }

    if let Some(param_ref) = &cel.param_ref {
        match (param_ref.name.is_empty(), param_ref.selector.is_some()) {
            (true, false) => {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingParamIdentifier,
                    "cel/paramRef",
                    PARAM_IDENTIFIER,
                ));
            }
            (false, true) => {
                return Err(ValidationError::new(
                    ValidationErrorKind::AmbiguousParamIdentifier,
                    "cel/paramRef",
                    PARAM_IDENTIFIER,
                ));
            }
            _ => {}
        }
        if param_ref.parameter_not_found_action.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingNotFoundAction,
                "cel/paramRef/parameterNotFoundAction",
                "cel.paramRef.parameterNotFoundAction is required",
            ));
        }
        if cel.param_kind.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingParamKind,
                "cel/paramKind",
                "cel.paramKind is required",
            ));
        }
    }

    if let Some(annotations) = &cel.audit_annotations {
        for (i, annotation) in annotations.iter().enumerate() {
            if annotation.key.is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingAuditAnnotationField,
                    format!("cel/auditAnnotations/{}/key", i),
                    "cel.auditAnnotation.key is required",
                ));
            }
            if annotation.value_expression.is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingAuditAnnotationField,
                    format!("cel/auditAnnotations/{}/valueExpression", i),
                    "cel.auditAnnotation.valueExpression is required",
                ));
            }
        }
    }

    Ok(())
}
