//! Timing and output capabilities consumed by the transmission core.
//!
//! The core never touches a peripheral directly. It is handed:
//! - an [`OutputLine`] (the IR LED pin),
//! - a [`BusyDelay`] for microsecond holds inside a frame (never yields),
//! - a [`Scheduler`] for the pauses between frames (may yield).
//!
//! Adapters cover any `embedded-hal` 1.0 pin/delay, so the same core runs
//! on ESP-IDF, on other HALs, and against host mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::IrError;
use crate::nec::Level;

/// Digital output driving the IR emitter.
pub trait OutputLine {
    /// Configure the line as an output driven low.
    ///
    /// Called once at startup. Failure is fatal to the core.
    fn configure(&mut self) -> Result<(), IrError>;

    /// Drive the line. Assumed infallible once configured.
    fn set_level(&mut self, level: Level);
}

/// Busy-wait microsecond delay.
///
/// Implementations must not yield to the scheduler: a preempted hold
/// breaks NEC timing (1690µs vs 560µs spaces).
pub trait BusyDelay {
    fn delay_us(&mut self, us: u32);
}

/// Scheduler services used between frames.
///
/// Shared by concurrent callers, hence `&self`.
pub trait Scheduler {
    /// Millisecond delay that lets other tasks run.
    fn delay_ms(&self, ms: u32);

    /// Monotonic timestamp in microseconds (log entries only).
    fn now_us(&self) -> i64;
}

/// [`OutputLine`] over any `embedded-hal` output pin.
pub struct HalOutput<P> {
    pin: P,
}

impl<P: OutputPin> HalOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputLine for HalOutput<P> {
    fn configure(&mut self) -> Result<(), IrError> {
        self.pin.set_low().map_err(|_| IrError::InitFailed { code: -1 })
    }

    #[inline]
    fn set_level(&mut self, level: Level) {
        // Configured pins on the supported HALs cannot fail here
        let _ = match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        };
    }
}

/// [`BusyDelay`] over any `embedded-hal` delay.
///
/// Only wrap delays that spin (e.g. `Ets` on ESP-IDF), never ones that
/// sleep the task.
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> BusyDelay for HalDelay<D> {
    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}
