#![no_main]

use libfuzzer_sys::fuzz_target;
use ruleguard::{AnchorKind, AnchorSet, validate_pattern};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    anchors: u8,
    max_depth: u8,
    json: String,
}

fuzz_target!(|input: Input| {
    let doc: serde_json::Value = match serde_json::from_str(&input.json) {
        Ok(v) => v,
        Err(_) => return,
    };

    let anchors: AnchorSet = AnchorKind::ALL
        .into_iter()
        .enumerate()
        .filter(|(i, _)| input.anchors & (1 << i) != 0)
        .map(|(_, k)| k)
        .collect();

    if let Err(err) = validate_pattern(&doc, "pattern", anchors, usize::from(input.max_depth)) {
        assert!(
            err.path.starts_with("pattern"),
            "failure path {:?} is not rooted at the base path",
            err.path
        );
    }
});
