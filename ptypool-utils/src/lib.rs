//! ptypool-utils: Common utilities shared across ptypool crates
//!
//! This crate provides:
//! - Unified error types ([`PtyPoolError`], [`Result`])
//! - Logging infrastructure ([`init_logging`], [`LogConfig`])
//! - XDG-compliant path utilities ([`paths`] module)

pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use error::{PtyPoolError, Result};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};

// Re-export commonly used path functions
pub use paths::{config_dir, config_file, log_dir, runtime_dir};
