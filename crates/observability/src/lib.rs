//! Tracing/logging setup shared by every binary and test in the workspace.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, init_with};

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}

/// Initialize logging for tests: human-readable, `debug`, captured per test.
pub fn init_test() {
    self::tracing::init_test();
}
