//! Console error types

use crate::config::ParamError;
use crate::error::IrError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Invalid value (bad number, unknown IR command name or index)
    InvalidValue,
    /// E03: Missing required argument
    MissingArg,
    /// E04: Value out of allowed range
    OutOfRange,
    /// E05: Unknown parameter name
    UnknownParam,
    /// E06: Operation not supported on this hardware
    NotSupported,
    /// E07: IR output unavailable
    Hardware,
}

impl ConsoleError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::UnknownParam => "E05",
            Self::NotSupported => "E06",
            Self::Hardware => "E07",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::UnknownParam => "unknown parameter",
            Self::NotSupported => "not supported",
            Self::Hardware => "IR output unavailable",
        }
    }
}

impl From<IrError> for ConsoleError {
    fn from(e: IrError) -> Self {
        match e {
            IrError::InvalidArgument => Self::InvalidValue,
            IrError::Unsupported => Self::NotSupported,
            IrError::InitFailed { .. } => Self::Hardware,
        }
    }
}

impl From<ParamError> for ConsoleError {
    fn from(e: ParamError) -> Self {
        match e {
            ParamError::UnknownParam => Self::UnknownParam,
            ParamError::OutOfRange => Self::OutOfRange,
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
