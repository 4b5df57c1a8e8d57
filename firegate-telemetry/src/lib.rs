//! # firegate-telemetry
//!
//! Structured logging for firegate using `tracing`.
//!
//! ```rust
//! use firegate_telemetry::{init_telemetry, info};
//!
//! init_telemetry("firegate");
//! info!("ready");
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{init_json_telemetry, init_telemetry};
pub use spans::{login_span, record_user};
