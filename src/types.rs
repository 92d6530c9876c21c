use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::*;

// ─── Validate rule ──────────────────────────────────────────────────────────

/// The `validate` block of a policy rule.
///
/// Exactly one of the strategy fields (`pattern`, `anyPattern`, `deny`,
/// `foreach`, `podSecurity`, `cel`, `manifests` with attestors) must be set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_action: Option<FailureAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_pattern: Option<AnyPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<Deny>,
    #[serde(rename = "foreach", skip_serializing_if = "Option::is_none")]
    pub foreach: Option<Vec<ForEachRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_security: Option<PodSecurity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cel: Option<CelRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifests: Option<Manifests>,
}

impl ValidateRule {
    /// The pattern document, with an explicit `null` resolved to absent.
    pub fn pattern(&self) -> Option<&Value> {
        resolve_pattern(self.pattern.as_ref())
    }
}

pub(crate) fn resolve_pattern(pattern: Option<&Value>) -> Option<&Value> {
    pattern.filter(|v| !v.is_null())
}

// ─── anyPattern ─────────────────────────────────────────────────────────────

/// A list of alternative patterns.
///
/// Rules built programmatically usually carry `Documents`. Rules handed over
/// in serialized form keep the raw text until validation deserializes it.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyPattern {
    Documents(Vec<Value>),
    Serialized(String),
}

impl AnyPattern {
    /// Resolve into the list of pattern documents.
    pub fn documents(&self) -> Result<Vec<Value>, serde_json::Error> {
        match self {
            AnyPattern::Documents(docs) => Ok(docs.clone()),
            AnyPattern::Serialized(raw) => serde_json::from_str(raw),
        }
    }
}

impl Serialize for AnyPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnyPattern::Documents(docs) => docs.serialize(serializer),
            AnyPattern::Serialized(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AnyPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Shape errors are left for the validator so they carry a rule path.
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(docs) => AnyPattern::Documents(docs),
            Value::String(raw) => AnyPattern::Serialized(raw),
            other => AnyPattern::Serialized(other.to_string()),
        })
    }
}

// ─── deny ───────────────────────────────────────────────────────────────────

/// Explicit deny conditions. The condition tree is opaque to this crate.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deny {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
}

// ─── foreach ────────────────────────────────────────────────────────────────

/// A per-item validation applied to each element of `list`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForEachRule {
    /// Expression selecting the collection to iterate.
    #[serde(default)]
    pub list: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preconditions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_scope: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_pattern: Option<AnyPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny: Option<Deny>,
    #[serde(rename = "foreach", skip_serializing_if = "Option::is_none")]
    pub foreach: Option<Vec<ForEachRule>>,
}

impl ForEachRule {
    pub fn pattern(&self) -> Option<&Value> {
        resolve_pattern(self.pattern.as_ref())
    }
}

// ─── podSecurity ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurity {
    pub level: PodSecurityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<PodSecurityExclusion>,
}

/// A Pod Security Standards control exempted from enforcement.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityExclusion {
    #[serde(default)]
    pub control_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub restricted_field: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

// ─── cel ────────────────────────────────────────────────────────────────────

/// Expression-language validation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelRule {
    #[serde(default)]
    pub expressions: Vec<CelExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_kind: Option<ParamKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_ref: Option<ParamRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_annotations: Option<Vec<AuditAnnotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<CelVariable>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelExpression {
    #[serde(default)]
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The kind of resource that holds expression parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamKind {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
}

/// Reference to the parameter resource(s). Exactly one of `name` and
/// `selector` identifies them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_not_found_action: Option<ParameterNotFoundAction>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    pub key: String,
    pub operator: SelectorOperator,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditAnnotation {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value_expression: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CelVariable {
    pub name: String,
    pub expression: String,
}

// ─── manifests ──────────────────────────────────────────────────────────────

/// Signed-manifest verification. Only counts as a strategy when at least one
/// attestor set is configured.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifests {
    #[serde(default)]
    pub attestors: Vec<AttestorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_fields: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AttestorSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(default)]
    pub entries: Vec<Attestor>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Attestor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<StaticKeyAttestor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificates: Option<CertificateAttestor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyless: Option<KeylessAttestor>,
    /// A nested attestor set, kept in wire form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestor: Option<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticKeyAttestor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rekor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctlog: Option<CTLog>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAttestor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rekor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctlog: Option<CTLog>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeylessAttestor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rekor: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctlog: Option<CTLog>,
}

/// Certificate transparency log settings for an attestor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CTLog {
    #[serde(rename = "ignoreSCT", skip_serializing_if = "Option::is_none")]
    pub ignore_sct: Option<bool>,
    #[serde(rename = "pubkey", skip_serializing_if = "Option::is_none")]
    pub ctlog_pub_key: Option<String>,
    #[serde(rename = "tsaCertChain", skip_serializing_if = "Option::is_none")]
    pub tsa_cert_chain: Option<String>,
}
