//! Air-conditioner command registry.
//!
//! Fixed mapping from semantic commands to 32-bit NEC codes. The table is
//! `const` application data: built at compile time, never mutated.
//!
//! # Code Table
//!
//! ```text
//!  idx  command       code
//!  ---  ------------  ----------
//!   0   power_on      0x20DF10EF
//!   1   power_off     0x20DF10EF   (same button, toggle)
//!   2   mode_cool     0x20DF08F7
//!   3   mode_heat     0x20DF0CF3
//!   4   mode_fan      0x20DF0EF1
//!   5   temp_up       0x20DF40BF
//!   6   temp_down     0x20DFC03F
//!   7   fan_1         0x20DF8877
//!   8   fan_2         0x20DF48B7
//!   9   fan_3         0x20DFC837
//! ```

use crate::error::IrError;

/// Air-conditioner commands, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    PowerOn = 0,
    PowerOff,
    ModeCool,
    ModeHeat,
    ModeFan,
    TempUp,
    TempDown,
    FanSpeed1,
    FanSpeed2,
    FanSpeed3,
}

/// Number of registered commands.
pub const COMMAND_COUNT: usize = 10;

/// NEC codes indexed by `Command as usize`.
pub const CODES: [u32; COMMAND_COUNT] = [
    0x20DF10EF,
    0x20DF10EF,
    0x20DF08F7,
    0x20DF0CF3,
    0x20DF0EF1,
    0x20DF40BF,
    0x20DFC03F,
    0x20DF8877,
    0x20DF48B7,
    0x20DFC837,
];

const NAMES: [&str; COMMAND_COUNT] = [
    "power_on",
    "power_off",
    "mode_cool",
    "mode_heat",
    "mode_fan",
    "temp_up",
    "temp_down",
    "fan_1",
    "fan_2",
    "fan_3",
];

impl Command {
    /// Every command, in index order.
    pub const ALL: [Command; COMMAND_COUNT] = [
        Command::PowerOn,
        Command::PowerOff,
        Command::ModeCool,
        Command::ModeHeat,
        Command::ModeFan,
        Command::TempUp,
        Command::TempDown,
        Command::FanSpeed1,
        Command::FanSpeed2,
        Command::FanSpeed3,
    ];

    /// NEC code for this command. Total over the enum, cannot fail.
    #[inline]
    pub const fn code(self) -> u32 {
        CODES[self as usize]
    }

    /// Registry index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable textual name (used by the console and log messages).
    #[inline]
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Convert a raw index into a command.
    ///
    /// Returns `Err(IrError::InvalidArgument)` for `index >= COMMAND_COUNT`.
    pub fn from_index(index: usize) -> Result<Self, IrError> {
        Self::ALL.get(index).copied().ok_or(IrError::InvalidArgument)
    }

    /// Look up a command by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self, IrError> {
        NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .map(|i| Self::ALL[i])
            .ok_or(IrError::InvalidArgument)
    }
}

impl core::str::FromStr for Command {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up the code registered at a raw index.
///
/// This is the bounds-checked entry for callers holding an untrusted number
/// (console input, HTTP payloads).
#[inline]
pub fn code_for_index(index: usize) -> Result<u32, IrError> {
    CODES.get(index).copied().ok_or(IrError::InvalidArgument)
}
