//! Logger setup for binaries and tests
//!
//! The library itself only emits `tracing` events. With the `log` feature
//! enabled those are forwarded to whatever `log` backend is installed, which
//! is `env_logger` here. Levels come from `RUST_LOG`, for example
//! `RUST_LOG=cert_decoder=trace`.

use log::{info, warn};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// `env_logger` setup shared by the CLI and the test suites
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging once at startup. Later calls do nothing.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("logging initialized");
        });
    }

    /// Initialize logging for tests, tolerating repeated calls
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the outcome of decoding one input
    pub fn log_decode_outcome(source: &str, outcome: &crate::Result<crate::CertificateRecord>) {
        match outcome {
            Ok(record) => info!(
                "decoded {source}: serial {} ({} SAN entries)",
                record.serial_number,
                record.subject_alternative_names.len()
            ),
            Err(e) => warn!("failed to decode {source}: {e}"),
        }
    }
}
