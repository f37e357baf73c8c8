//! Hardware Abstraction Layer for the IR remote.
//!
//! Capability traits the core consumes, plus their implementations.
//! Business logic stays in core modules, HAL is just I/O.

pub mod timing;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use timing::{BusyDelay, HalDelay, HalOutput, OutputLine, Scheduler};
