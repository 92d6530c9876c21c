use proptest::prelude::*;
use ruleguard::anchor::{AnchorKind, AnchorSet};
use ruleguard::error::ValidationErrorKind;
use ruleguard::pattern::validate_pattern;
use serde_json::{Map, Value, json};

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z][a-zA-Z.]{0,8}",
        1 => "[+<=X^]?\\([a-z]{1,6}\\)",
        1 => "[+<=X^]?\\([a-z]{0,3}",
    ]
}

fn arb_pattern() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z*?<>!|]{0,10}".prop_map(Value::String),
    ];
    leaf.prop_recursive(6, 64, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec((arb_key(), inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_anchor_set() -> impl Strategy<Value = AnchorSet> {
    proptest::sample::subsequence(AnchorKind::ALL.to_vec(), 0..=AnchorKind::ALL.len())
        .prop_map(|kinds| kinds.into_iter().collect::<AnchorSet>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Widening the accepted anchor set never turns a pass into a failure.
    #[test]
    fn wider_anchor_set_is_monotone(
        doc in arb_pattern(),
        narrow in arb_anchor_set(),
        extra in arb_anchor_set(),
    ) {
        let wide: AnchorSet = narrow.iter().chain(extra.iter()).collect();
        if validate_pattern(&doc, "pattern", narrow, 64).is_ok() {
            prop_assert!(validate_pattern(&doc, "pattern", wide, 64).is_ok());
        }
    }

    // Documents with only plain field names pass with no anchors allowed.
    #[test]
    fn plain_documents_always_pass(
        entries in proptest::collection::vec(("[a-z]{1,8}", any::<i32>()), 0..8),
    ) {
        let doc = Value::Object(entries.into_iter().map(|(k, v)| (k, json!(v))).collect());
        prop_assert!(validate_pattern(&doc, "pattern", AnchorSet::EMPTY, 64).is_ok());
    }

    // Reported failure paths always start at the base path.
    #[test]
    fn failure_path_is_rooted(doc in arb_pattern(), set in arb_anchor_set()) {
        if let Err(err) = validate_pattern(&doc, "anyPattern/3", set, 64) {
            prop_assert!(err.path.starts_with("anyPattern/3"), "path {}", err.path);
        }
    }

    // Arbitrarily deep documents are cut off instead of exhausting the stack.
    #[test]
    fn deep_nesting_is_bounded(levels in 65usize..1000) {
        let doc = (0..levels).fold(json!(1), |acc, i| {
            if i % 2 == 0 { json!([acc]) } else { json!({ "k": acc }) }
        });
        let err = validate_pattern(&doc, "pattern", AnchorSet::VALIDATE, 64).unwrap_err();
        prop_assert_eq!(err.kind, ValidationErrorKind::NestingTooDeep);
    }
}
