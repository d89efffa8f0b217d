//! Shared test infrastructure.

/// Instruction and ELF builders.
pub mod builder;


/// Installs a test-friendly log subscriber once per process.
///
/// Filtered through `RUST_LOG`; silent by default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
