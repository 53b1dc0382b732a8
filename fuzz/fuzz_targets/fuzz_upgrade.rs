#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, feeds valid UTF-8 to the gate and the pipeline.
// Goal: no panics, and no errors with default options.
fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let options = graphql_upgrader_core::UpgradeOptions::default();
        let _ = graphql_upgrader_core::is_eligible(source, &options);
        let result = graphql_upgrader_core::upgrade(source, &options);
        assert!(result.is_ok(), "default options must never fail");
    }
});
