//! Error types for the IR transmission core.
//!
//! All errors are reported synchronously to the caller. Once a frame has
//! started there is nothing left to fail: the channel is open-loop, so
//! "sent" only ever means "pulses were generated".

/// IR core error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrError {
    /// Command index or name outside the registry, or malformed input.
    /// Raised before any hardware access.
    InvalidArgument,

    /// The output line could not be configured.
    ///
    /// `code` carries the driver error code (`esp_err_t` on ESP-IDF,
    /// `-1` when the driver gives none). Fatal: no transmission is possible.
    InitFailed { code: i32 },

    /// Operation has no implementation on this hardware (code learning).
    Unsupported,
}

impl IrError {
    /// Short error code, stable for outer surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARG",
            Self::InitFailed { .. } => "INIT_FAILED",
            Self::Unsupported => "UNSUPPORTED",
        }
    }

    /// Human readable message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid argument",
            Self::InitFailed { .. } => "output line initialization failed",
            Self::Unsupported => "not supported (no IR receiver)",
        }
    }
}

impl core::fmt::Display for IrError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InitFailed { code } => write!(f, "{}: {} ({})", self.code(), self.message(), code),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_driver_code() {
        let err = IrError::InitFailed { code: 258 };
        assert_eq!(format!("{}", err), "INIT_FAILED: output line initialization failed (258)");
    }

    #[test]
    fn test_display_invalid_argument() {
        assert_eq!(format!("{}", IrError::InvalidArgument), "INVALID_ARG: invalid argument");
    }
}
