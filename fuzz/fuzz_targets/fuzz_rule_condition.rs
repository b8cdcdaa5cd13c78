#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_layout::{RuleCondition, matches_width};

fuzz_target!(|data: &[u8]| {
    // First 4 bytes pick the width; the rest is the condition text.
    if data.len() < 4 {
        return;
    }
    let width = f64::from(u32::from_le_bytes([data[0], data[1], data[2], data[3]]) % 10_000);
    let Ok(text) = std::str::from_utf8(&data[4..]) else {
        return;
    };

    let parsed = RuleCondition::parse(text);
    let matched = matches_width(text, width);

    // Unparsable conditions never match.
    if parsed.is_none() {
        assert!(!matched, "unparsable {text:?} matched {width}");
    }

    // The string entry point agrees with the parsed condition.
    if let Some(cond) = parsed {
        assert_eq!(cond.matches(width), matched);
        // Display re-parses to the same condition.
        let again = RuleCondition::parse(&cond.to_string());
        assert_eq!(again, Some(cond), "round trip of {text:?}");
    }
});
