//! Structural validation of pattern documents.
//!
//! The walker checks key syntax and anchor placement only. Whether a resource
//! matches the pattern is decided at admission time, not here.

use serde_json::{Map, Value};

use crate::anchor::{AnchorKind, AnchorSet, KeyForm, classify};
use crate::error::{ValidationError, ValidationErrorKind};

/// Validate a pattern document rooted at `path`.
///
/// Every anchor key must parse and its kind must be in `anchors`. Mappings
/// are visited in document order and the first violation is returned with
/// the slash-delimited path of the offending key. Containers nested deeper
/// than `max_depth` are rejected with [`ValidationErrorKind::NestingTooDeep`].
pub fn validate_pattern(
    pattern: &Value,
    path: &str,
    anchors: AnchorSet,
    max_depth: usize,
) -> Result<(), ValidationError> {
    Walker { anchors, max_depth }.walk(pattern, path, 0)
}

struct Walker {
    anchors: AnchorSet,
    max_depth: usize,
}

impl Walker {
    fn walk(&self, value: &Value, path: &str, depth: usize) -> Result<(), ValidationError> {
        match value {
            Value::Object(map) => {
                self.enter(path, depth)?;
                self.walk_map(map, path, depth + 1)
            }
            Value::Array(items) => {
                self.enter(path, depth)?;
                for (i, item) in items.iter().enumerate() {
                    self.walk(item, &join(path, &i.to_string()), depth + 1)?;
                }
                Ok(())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(()),
        }
    }

    fn enter(&self, path: &str, depth: usize) -> Result<(), ValidationError> {
        if depth >= self.max_depth {
            tracing::warn!(
                path,
                max_depth = self.max_depth,
                "pattern nesting ceiling hit"
            );
            return Err(ValidationError::new(
                ValidationErrorKind::NestingTooDeep,
                path,
                format!("pattern nesting exceeds maximum depth of {}", self.max_depth),
            ));
        }
        Ok(())
    }

    fn walk_map(
        &self,
        map: &Map<String, Value>,
        path: &str,
        depth: usize,
    ) -> Result<(), ValidationError> {
        for (key, value) in map {
            let key_path = join(path, key);
            match classify(key) {
                KeyForm::Field(_) => {}
                KeyForm::Malformed(_) => {
                    return Err(ValidationError::new(
                        ValidationErrorKind::MalformedAnchor,
                        key_path,
                        format!("malformed anchor {}", key),
                    ));
                }
                KeyForm::Anchor(anchor) => {
                    if !self.anchors.contains(anchor.kind) {
                        return Err(ValidationError::new(
                            ValidationErrorKind::DisallowedAnchor,
                            key_path,
                            format!("unsupported anchor {}", key),
                        ));
                    }
                    if anchor.kind == AnchorKind::Existence {
                        check_existence_value(value, &key_path)?;
                    }
                }
            }
            self.walk(value, &key_path, depth)?;
        }
        Ok(())
    }
}

// An existence anchor asserts that at least one element of a list matches,
// so its value has to be a non-empty list of sub-patterns.
fn check_existence_value(value: &Value, path: &str) -> Result<(), ValidationError> {
    match value.as_array() {
        None => Err(ValidationError::new(
            ValidationErrorKind::InvalidAnchorValue,
            path,
            "existence anchor should have value of type list",
        )),
        Some(items) if items.is_empty() => Err(ValidationError::new(
            ValidationErrorKind::InvalidAnchorValue,
            path,
            "existence anchor: should have at least one value",
        )),
        Some(_) => Ok(()),
    }
}

pub(crate) fn join(path: &str, segment: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        format!("{}{}", path, segment)
    } else {
        format!("{}/{}", path, segment)
    }
}
