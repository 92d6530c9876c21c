#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let rule = match ruleguard::parse(&s) {
        Ok(r) => r,
        Err(_) => return,
    };

    // Validation must be a pure function of the rule.
    let first = ruleguard::validate(&rule);
    let second = ruleguard::validate(&rule);
    assert_eq!(first, second, "validation is not deterministic for {:?}", rule);
});
