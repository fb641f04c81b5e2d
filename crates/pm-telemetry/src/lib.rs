//! # PM Telemetry
//!
//! Structured logging for the phased-mint subsystems.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pm_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("03", "access-controller");
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PM_SERVICE_NAME` | `phased-mint` | Service name in logs |
//! | `PM_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `PM_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `PM_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Log filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use pm_telemetry::subsystem_span;
///
/// fn build_allow_list() {
///     let _span = subsystem_span!("build_allow_list", subsystem = "hash-tree", members = 128);
/// }
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
