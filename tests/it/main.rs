mod basic;
mod output_params;
mod prefix;
mod spy_macro;
mod verification;

/// Route `tracing` output through the test harness, so `RUST_LOG=callspy=debug` shows spy activity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
