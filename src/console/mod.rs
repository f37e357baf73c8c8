//! Serial console for manual control and diagnostics
//!
//! Line oriented: the firmware reads a line, parses it and executes it
//! against any [`RemoteControl`](crate::remote::RemoteControl).
//! Zero heap allocation.

pub mod commands;
pub mod error;
pub mod parser;

pub use commands::{execute, parse_code, COMMANDS};
pub use error::ConsoleError;
pub use parser::{parse_line, ParsedCommand};
