use super::common::load_suite;
use ruleguard::error::ValidationErrorKind;
use ruleguard::parse::parse;
use ruleguard::validate::validate;

/// A single validation test case from the suite.
#[derive(Debug, serde::Deserialize)]
struct TestCase {
    name: String,
    id: String,
    input: String,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    valid: bool,
    #[serde(default)]
    kind: Option<ValidationErrorKind>,
    #[serde(default)]
    path: Option<String>,
}

#[test]
fn validate_conformance_suite() {
    let cases: Vec<TestCase> = load_suite("validate/suite.yaml");

    let mut passed = 0;
    let mut failed = 0;

    for case in &cases {
        let rule = match parse(&case.input) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("  FAIL [{}] {}: parse error: {}", case.id, case.name, e);
                failed += 1;
                continue;
            }
        };

        let result = validate(&rule);
        let case_ok = match (&result, case.expected.valid) {
            (Ok(()), true) => true,
            (Ok(()), false) => {
                eprintln!(
                    "  FAIL [{}] {}: expected {:?} but got valid",
                    case.id, case.name, case.expected.kind
                );
                false
            }
            (Err(err), true) => {
                eprintln!(
                    "  FAIL [{}] {}: expected valid but got {}",
                    case.id, case.name, err
                );
                false
            }
            (Err(err), false) => {
                let kind_ok = case.expected.kind.is_none_or(|k| k == err.kind);
                let path_ok = case.expected.path.as_ref().is_none_or(|p| *p == err.path);
                if !(kind_ok && path_ok) {
                    eprintln!(
                        "  FAIL [{}] {}: expected {:?} at {:?}, got {}",
                        case.id, case.name, case.expected.kind, case.expected.path, err
                    );
                }
                kind_ok && path_ok
            }
        };

        if case_ok {
            passed += 1;
        } else {
            failed += 1;
        }
    }

    eprintln!(
        "\nValidation conformance: {} passed, {} failed out of {} total",
        passed,
        failed,
        cases.len()
    );

    assert!(passed > 0, "No validation conformance cases were tested");
    assert_eq!(failed, 0, "{} validation conformance cases failed", failed);
}
