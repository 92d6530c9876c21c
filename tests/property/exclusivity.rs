use proptest::prelude::*;
use ruleguard::enums::PodSecurityLevel;
use ruleguard::error::ValidationErrorKind;
use ruleguard::types::*;
use ruleguard::validate::{Selection, exactly_one_of, rule_variants, validate};
use serde_json::json;

/// Build a rule where each flagged strategy is set to a minimal well-formed value.
fn rule_with(flags: [bool; 7], empty_manifests: bool) -> ValidateRule {
    let [pattern, any_pattern, deny, foreach, pod_security, cel, manifests] = flags;
    ValidateRule {
        pattern: pattern.then(|| json!({"metadata": {"name": "?*"}})),
        any_pattern: any_pattern.then(|| AnyPattern::Documents(vec![json!({"kind": "Pod"})])),
        deny: deny.then(Deny::default),
        foreach: foreach.then(Vec::new),
        pod_security: pod_security.then(|| PodSecurity {
            level: PodSecurityLevel::Baseline,
            version: None,
            exclude: vec![],
        }),
        cel: cel.then(CelRule::default),
        manifests: if manifests {
            Some(Manifests {
                attestors: vec![AttestorSet::default()],
                ..Default::default()
            })
        } else if empty_manifests {
            Some(Manifests::default())
        } else {
            None
        },
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Valid iff exactly one strategy is selected.
    #[test]
    fn valid_iff_exactly_one_strategy(flags in any::<[bool; 7]>(), empty_manifests in any::<bool>()) {
        let rule = rule_with(flags, empty_manifests);
        let selected = flags.iter().filter(|&&f| f).count();
        let result = validate(&rule);
        match selected {
            1 => {
                prop_assert!(result.is_ok(), "flags {:?}: {:?}", flags, result);
            }
            0 => {
                prop_assert_eq!(result.unwrap_err().kind, ValidationErrorKind::MissingVariant);
            }
            _ => {
                prop_assert_eq!(result.unwrap_err().kind, ValidationErrorKind::AmbiguousVariant);
            }
        }
    }

    // Presence flags reported for a rule match the flags used to build it.
    #[test]
    fn rule_variants_reflect_construction(flags in any::<[bool; 7]>(), empty_manifests in any::<bool>()) {
        prop_assert_eq!(rule_variants(&rule_with(flags, empty_manifests)), flags);
    }

    // Pattern together with deny is always ambiguous.
    #[test]
    fn pattern_and_deny_always_ambiguous(flags in any::<[bool; 7]>()) {
        let mut flags = flags;
        flags[0] = true;
        flags[2] = true;
        let err = validate(&rule_with(flags, false)).unwrap_err();
        prop_assert_eq!(err.kind, ValidationErrorKind::AmbiguousVariant);
    }

    #[test]
    fn exactly_one_of_counts(present in proptest::collection::vec(any::<bool>(), 0..12)) {
        let expected = match present.iter().filter(|&&p| p).count() {
            0 => Selection::Missing,
            1 => Selection::One,
            _ => Selection::Ambiguous,
        };
        prop_assert_eq!(exactly_one_of(&present), expected);
    }

    // Validation is a pure function of its input.
    #[test]
    fn validation_is_idempotent(flags in any::<[bool; 7]>(), empty_manifests in any::<bool>()) {
        let rule = rule_with(flags, empty_manifests);
        prop_assert_eq!(validate(&rule), validate(&rule));
    }
}
