//! Module: config
//!
//! Purpose: Hardware constants and runtime-tunable transmission parameters.
//!
//! Architecture:
//! - Board wiring and carrier settings: compile-time constants
//! - Repeat policy: lock-free atomics, changed from the console at runtime
//! - `PARAMS`: descriptor table driving `set`/`show`
//!
//! Safety: RT-safe. All access via atomics, no locks.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::repeat::{RepeatPolicy, DEFAULT_REPEAT_COUNT, DEFAULT_REPEAT_GAP_MS};

/// GPIO driving the IR LED.
pub const IR_LED_PIN: i32 = 2;

/// IR carrier frequency for the RMT backend (NEC: 38 kHz).
pub const CARRIER_HZ: u32 = 38_000;

/// Carrier duty cycle for the RMT backend.
pub const CARRIER_DUTY_PERCENT: u8 = 33;

/// FreeRTOS priority of the console task, which runs every transmission.
pub const TX_TASK_PRIORITY: u8 = 5;

/// FreeRTOS priority of the log drain task (pinned to the other core).
///
/// Must stay below `TX_TASK_PRIORITY`: the drain blocks on UART writes and
/// may never preempt a bit-banged frame.
pub const LOG_DRAIN_PRIORITY: u8 = 1;

/// Allowed range for `repeat_count`.
pub const REPEAT_COUNT_RANGE: (u32, u32) = (1, 10);

/// Allowed range for `repeat_gap_ms`.
pub const REPEAT_GAP_RANGE: (u32, u32) = (0, 1000);

/// Parameter update error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// No parameter with that name.
    UnknownParam,
    /// Value outside the parameter's range.
    OutOfRange,
}

/// Runtime repeat configuration.
pub struct RepeatConfig {
    count: AtomicU8,
    gap_ms: AtomicU32,
}

impl RepeatConfig {
    pub const fn new() -> Self {
        Self {
            count: AtomicU8::new(DEFAULT_REPEAT_COUNT),
            gap_ms: AtomicU32::new(DEFAULT_REPEAT_GAP_MS),
        }
    }

    /// Current policy.
    #[inline]
    pub fn policy(&self) -> RepeatPolicy {
        RepeatPolicy {
            count: self.count.load(Ordering::Relaxed),
            gap_ms: self.gap_ms.load(Ordering::Relaxed),
        }
    }

    pub fn set_count(&self, count: u32) -> Result<(), ParamError> {
        check_range(count, REPEAT_COUNT_RANGE)?;
        self.count.store(count as u8, Ordering::Relaxed);
        Ok(())
    }

    pub fn set_gap_ms(&self, gap_ms: u32) -> Result<(), ParamError> {
        check_range(gap_ms, REPEAT_GAP_RANGE)?;
        self.gap_ms.store(gap_ms, Ordering::Relaxed);
        Ok(())
    }

    /// Back to 3 frames / 100ms.
    pub fn reset(&self) {
        self.count.store(DEFAULT_REPEAT_COUNT, Ordering::Relaxed);
        self.gap_ms.store(DEFAULT_REPEAT_GAP_MS, Ordering::Relaxed);
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_range(value: u32, (min, max): (u32, u32)) -> Result<(), ParamError> {
    if value < min || value > max {
        return Err(ParamError::OutOfRange);
    }
    Ok(())
}

/// Console-visible parameter.
pub struct ParamDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub min: u32,
    pub max: u32,
    pub get_fn: fn(&RepeatConfig) -> u32,
    pub set_fn: fn(&RepeatConfig, u32) -> Result<(), ParamError>,
}

fn get_count(config: &RepeatConfig) -> u32 {
    config.policy().count as u32
}

fn get_gap_ms(config: &RepeatConfig) -> u32 {
    config.policy().gap_ms
}

/// All tunable parameters.
pub static PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor {
        name: "repeat_count",
        brief: "Frames per command",
        min: REPEAT_COUNT_RANGE.0,
        max: REPEAT_COUNT_RANGE.1,
        get_fn: get_count,
        set_fn: RepeatConfig::set_count,
    },
    ParamDescriptor {
        name: "repeat_gap_ms",
        brief: "Pause after each frame (ms)",
        min: REPEAT_GAP_RANGE.0,
        max: REPEAT_GAP_RANGE.1,
        get_fn: get_gap_ms,
        set_fn: RepeatConfig::set_gap_ms,
    },
];

/// Find a parameter by exact name.
pub fn find_param(name: &str) -> Option<&'static ParamDescriptor> {
    PARAMS.iter().find(|p| p.name == name)
}

/// Set a parameter by name.
pub fn set_param(config: &RepeatConfig, name: &str, value: u32) -> Result<(), ParamError> {
    let param = find_param(name).ok_or(ParamError::UnknownParam)?;
    (param.set_fn)(config, value)
}

/// Process-wide repeat configuration used by the firmware.
pub static CONFIG: RepeatConfig = RepeatConfig::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_runs_below_transmit_task() {
        assert!(LOG_DRAIN_PRIORITY < TX_TASK_PRIORITY);
    }

    #[test]
    fn test_defaults() {
        let config = RepeatConfig::new();
        assert_eq!(config.policy(), RepeatPolicy { count: 3, gap_ms: 100 });
    }

    #[test]
    fn test_set_param_by_name() {
        let config = RepeatConfig::new();
        assert_eq!(set_param(&config, "repeat_count", 5), Ok(()));
        assert_eq!(set_param(&config, "repeat_gap_ms", 250), Ok(()));
        assert_eq!(config.policy(), RepeatPolicy { count: 5, gap_ms: 250 });
    }

    #[test]
    fn test_range_checks() {
        let config = RepeatConfig::new();
        assert_eq!(config.set_count(0), Err(ParamError::OutOfRange));
        assert_eq!(config.set_count(11), Err(ParamError::OutOfRange));
        assert_eq!(config.set_gap_ms(1001), Err(ParamError::OutOfRange));
        assert_eq!(set_param(&config, "carrier_hz", 20), Err(ParamError::UnknownParam));
        assert_eq!(config.policy(), RepeatPolicy::default());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let config = RepeatConfig::new();
        config.set_count(7).unwrap();
        config.set_gap_ms(0).unwrap();
        config.reset();
        assert_eq!(config.policy(), RepeatPolicy::default());
    }
}
