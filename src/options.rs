//! Validator configuration.

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorSet;

pub const DEFAULT_MAX_PATTERN_DEPTH: usize = 64;
pub const DEFAULT_MAX_FOREACH_DEPTH: usize = 16;

/// Tunables for [`Validator`](crate::validate::Validator).
///
/// Deserializes from the host's configuration with every field optional:
///
/// ```yaml
/// anchors: [condition, existence, equality, negation, global]
/// maxPatternDepth: 64
/// maxForeachDepth: 16
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Anchor kinds accepted in `pattern`, `anyPattern` and foreach patterns.
    pub anchors: AnchorSet,
    /// Maximum nesting of mappings and sequences inside a pattern document.
    pub max_pattern_depth: usize,
    /// Maximum nesting of foreach entries.
    pub max_foreach_depth: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        ValidateOptions {
            anchors: AnchorSet::VALIDATE,
            max_pattern_depth: DEFAULT_MAX_PATTERN_DEPTH,
            max_foreach_depth: DEFAULT_MAX_FOREACH_DEPTH,
        }
    }
}
