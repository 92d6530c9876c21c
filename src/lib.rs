//! Structural validator for the `validate` block of admission-policy rules.
//!
//! A `validate` rule selects exactly one strategy (a resource pattern, a list
//! of alternative patterns, deny conditions, per-item foreach rules, a Pod
//! Security Standards profile, CEL expressions, or manifest attestors). This
//! crate checks that a rule is well-formed before it is admitted:
//!
//! ```text
//! parse(yaml) → ValidateRule → validate(&rule) → Ok(()) | ValidationError { kind, path, message }
//! ```
//!
//! Validation is fail-fast and pure. It never evaluates patterns against
//! resources and never type-checks CEL.
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! message: "images must come from the internal registry"
//! pattern:
//!   spec:
//!     containers:
//!       - image: "registry.internal/*"
//! "#;
//!
//! let rule = ruleguard::load(yaml).expect("valid rule");
//! assert!(rule.pattern().is_some());
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `yaml`  | yes     | YAML input via `serde-saphyr`. Enables [`parse()`] and [`load`]. |

pub mod anchor;
pub mod enums;
pub mod error;
pub mod options;
pub mod parse;
pub mod pattern;
pub mod types;
pub mod validate;

pub use anchor::{AnchorKind, AnchorSet};
pub use error::*;
pub use options::ValidateOptions;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
#[cfg(feature = "yaml")]
pub use parse::parse;
pub use parse::parse_json;
pub use pattern::validate_pattern;
pub use validate::{Validator, validate};

/// Convenience entry point composing parse → validate with default options.
///
/// # Errors
///
/// Returns [`RuleError::Parse`] if the text is not a rule and
/// [`RuleError::Validation`] for the first structural violation.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// pattern:
///   metadata:
///     labels:
///       app: "?*"
/// deny:
///   conditions: {}
/// "#;
///
/// match ruleguard::load(yaml) {
///     Ok(_) => unreachable!(),
///     Err(err) => eprintln!("{}", err),
/// }
/// ```
#[cfg(feature = "yaml")]
pub fn load(input: &str) -> Result<ValidateRule, RuleError> {
    let rule = parse::parse(input)?;
    validate::validate(&rule)?;
    Ok(rule)
}
