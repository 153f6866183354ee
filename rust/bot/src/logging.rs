use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber for the service.
///
/// Respects `RUST_LOG`; defaults to info-level output with debug detail for
/// this crate. Call once at process start, before the service is built.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fateweaver_bot=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");
}
