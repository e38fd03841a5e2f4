#![allow(dead_code)]

use std::sync::Once;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness so `--nocapture` shows it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn channels(hex: &str) -> [u8; 3] {
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).expect("hex channel")
    };
    [channel(1..3), channel(3..5), channel(5..7)]
}
