//! Tracing bootstrap for hosts embedding the session core.

/// Initialize a formatted tracing subscriber honoring `RUST_LOG`.
///
/// Falls back to `info` when no filter is set. Safe to call once per
/// process; subsequent calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
