//! Shared tracing setup for the storefront binaries and tests.

/// Initialize process-wide tracing using `STOREFRONT_LOG_FORMAT` and `RUST_LOG`.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
