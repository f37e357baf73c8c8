//! # RustAirconIrRemote
//!
//! NEC infrared remote for an air-conditioning unit.
//!
//! ## Architecture
//!
//! ```text
//! Command ─▶ registry ─▶ u32 code ─▶ nec::encode ─▶ Frame (67 pulses)
//!                                                     │
//!                        IrRemote ─▶ repeat ─▶ FrameTransmitter ─▶ IR LED
//! ```
//!
//! - Encoding is pure and host-testable
//! - Hardware is reached only through the capability traits in [`hal`]
//! - Inside a frame nothing yields; between frames the scheduler runs
//! - One transmission owns the output line at a time

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod nec;
pub mod remote;
pub mod repeat;
pub mod stats;
pub mod transmitter;

pub use command::{Command, CODES, COMMAND_COUNT};
pub use config::CONFIG;
pub use error::IrError;
pub use log_globals::TX_LOG_STREAM;
pub use nec::{encode, Frame, Level, Pulse, FRAME_LEN, NEC_TIMING};
pub use remote::{IrRemote, RemoteControl, TxState};
pub use repeat::RepeatPolicy;
pub use stats::{StatsSnapshot, TxStats};
pub use transmitter::{BitBangTransmitter, FrameTransmitter};
