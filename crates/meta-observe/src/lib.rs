//! Logging setup shared by binaries built on the Meta task crates.
//!
//! ```no_run
//! use meta_observe::{LoggerConfig, logger_init};
//!
//! let cfg = LoggerConfig::from_env().unwrap_or_default();
//! logger_init(&cfg).expect("logger");
//! ```
mod logger;
pub use logger::*;
