//! Fuzz target for `archguard.toml` parsing and rule resolution.
//!
//! Invalid configs must surface as errors, never as panics.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = archguard_settings::parse_config_toml(text) {
            let _ =
                archguard_settings::resolve_config(cfg, archguard_settings::Overrides::default());
        }
    }
});
