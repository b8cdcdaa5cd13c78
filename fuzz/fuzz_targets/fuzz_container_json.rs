#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera::{Container, EngineConfig, FailurePolicy, LayoutEngine, LoadConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(container) = Container::from_json_str(text) else {
        return;
    };

    let config = EngineConfig::default().with_failure_policy(FailurePolicy::IsolateSection);
    let mut engine = LayoutEngine::new(config);
    for width in [0.0, 640.0, 1100.0, 2000.0] {
        engine.set_viewport_width(width);
        // Fatal layout errors are data here; panics are bugs.
        let Ok(resolved) = engine.resolve(&container) else {
            panic!("isolated pass returned an error");
        };
        assert_eq!(resolved.sections.len(), container.sections.len());
    }
});
