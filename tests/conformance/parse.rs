use super::common::load_suite;
use ruleguard::error::ParseErrorKind;
use ruleguard::parse::parse;

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    name: String,
    id: String,
    input: String,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    kind: ParseErrorKind,
    #[serde(default)]
    path: Option<String>,
}

#[test]
fn parse_invalid_suite() {
    let cases: Vec<TestCase> = load_suite("parse/suite.yaml");
    assert!(!cases.is_empty(), "No parse conformance cases found");

    for case in &cases {
        let err = match parse(&case.input) {
            Ok(rule) => panic!(
                "[{}] {}: expected parse error, got {:?}",
                case.id, case.name, rule
            ),
            Err(e) => e,
        };
        assert_eq!(
            err.kind, case.expected.kind,
            "[{}] {}: {}",
            case.id, case.name, err
        );
        if let Some(path) = &case.expected.path {
            assert_eq!(
                err.path.as_deref(),
                Some(path.as_str()),
                "[{}] {}",
                case.id,
                case.name
            );
        }
    }
}
