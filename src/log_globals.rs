//! Global log stream instance.
//!
//! Producers: dispatcher and console (any task). Consumer: the drain loop
//! in the firmware binary.

use crate::logging::LogStream;

/// Log stream for the IR transmission core.
pub static TX_LOG_STREAM: LogStream = LogStream::new();
