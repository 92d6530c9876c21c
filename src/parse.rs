use serde_json::Value;

use crate::error::{ParseError, ParseErrorKind};
use crate::types::ValidateRule;

const KNOWN_FIELDS: &[&str] = &[
    "message",
    "failureAction",
    "pattern",
    "anyPattern",
    "deny",
    "foreach",
    "podSecurity",
    "cel",
    "manifests",
];

/// Parse a YAML string into an unvalidated rule.
///
/// Accepts either the bare `validate` block or a mapping with a single
/// `validate` key wrapping it. Performs deserialization and type mapping
/// only; call [`validate`](crate::validate::validate) to check structure.
#[cfg(feature = "yaml")]
pub fn parse(input: &str) -> Result<ValidateRule, ParseError> {
    check_non_empty(input)?;

    let value: Value = serde_saphyr::from_str(input).map_err(|e| {
        let msg = e.to_string();
        fail(classify_saphyr_error(&msg), msg, None)
    })?;

    from_value(value)
}

/// Parse a JSON string into an unvalidated rule. Same contract as `parse`.
pub fn parse_json(input: &str) -> Result<ValidateRule, ParseError> {
    check_non_empty(input)?;

    let value: Value = serde_json::from_str(input)
        .map_err(|e| fail(ParseErrorKind::Syntax, e.to_string(), None))?;

    from_value(value)
}

fn from_value(value: Value) -> Result<ValidateRule, ParseError> {
    let value = unwrap_validate_key(value);

    let Some(obj) = value.as_object() else {
        return Err(fail(
            ParseErrorKind::TypeMismatch,
            "validate rule must be a mapping".to_string(),
            None,
        ));
    };

    for key in obj.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            return Err(fail(
                ParseErrorKind::UnknownVariant,
                format!("unknown validate field: {}", key),
                Some(key.clone()),
            ));
        }
    }

    serde_json::from_value(value).map_err(|e| {
        let msg = e.to_string();
        fail(classify_json_error(&msg), msg, None)
    })
}

fn unwrap_validate_key(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if obj.len() == 1 && obj.contains_key("validate") => {
            obj.remove("validate").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn check_non_empty(input: &str) -> Result<(), ParseError> {
    if input.trim().is_empty() {
        return Err(fail(ParseErrorKind::Syntax, "empty input".to_string(), None));
    }
    Ok(())
}

fn fail(kind: ParseErrorKind, message: String, path: Option<String>) -> ParseError {
    tracing::debug!(?kind, %message, "validate rule parse failed");
    ParseError {
        kind,
        message,
        path,
    }
}

#[cfg(feature = "yaml")]
fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown") || lower.contains("variant") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("type") || lower.contains("invalid") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}

fn classify_json_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("unknown variant") || lower.contains("unknown field") {
        ParseErrorKind::UnknownVariant
    } else if lower.contains("missing field") || lower.contains("invalid type") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
