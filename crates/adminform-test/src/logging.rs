//! Test logger.
//!
//! Captured by the test runner, filtered with `RUST_LOG` as usual.

/// Install the test logger. Safe to call from every test; only the first call
/// in a process installs anything.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
