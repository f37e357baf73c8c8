//! Command dispatcher.
//!
//! Public entry point of the IR core. Validates requests, resolves codes,
//! and runs the repeat controller over the transmitter while holding the
//! output line exclusively.
//!
//! # State Machine
//!
//! ```text
//!        send_*()                     bounded frames + pauses
//!  Idle ─────────▶ Transmitting ───────────────────────────▶ Idle
//! ```
//!
//! There is no aborted state: a started transmission always completes.
//!
//! # Line Ownership
//!
//! The transmitter sits behind an atomic flag. A request takes the flag for
//! the whole session (all repeats) through a [`LineGuard`], released on drop.
//! A concurrent request waits, yielding 1ms at a time, so two pulse trains
//! can never interleave on the pin.

use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

use crate::command::Command;
use crate::config::RepeatConfig;
use crate::error::IrError;
use crate::hal::timing::Scheduler;
use crate::logging::LogStream;
use crate::nec::encode;
use crate::repeat::{transmit_repeated, RepeatPolicy};
use crate::stats::{StatsSnapshot, TxStats};
use crate::transmitter::FrameTransmitter;
use crate::{tx_debug, tx_error, tx_info, tx_warn};

/// Poll interval while waiting for a busy line.
pub const LINE_WAIT_MS: u32 = 1;

/// Externally visible dispatcher state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    Idle,
    Transmitting,
}

/// Operations exposed to outer surfaces (console, HTTP handlers).
pub trait RemoteControl {
    /// Send a registered command with the configured repeat policy.
    fn send_command(&self, command: Command) -> Result<(), IrError>;

    /// Send the command at a raw registry index.
    fn send_command_index(&self, index: usize) -> Result<(), IrError>;

    /// Send the command with the given name.
    fn send_command_name(&self, name: &str) -> Result<(), IrError>;

    /// Send one frame of an arbitrary code.
    fn send_raw_code(&self, code: u32) -> Result<(), IrError>;

    /// Capture a code from an IR receiver.
    fn learn_code(&self) -> Result<u32, IrError>;

    fn state(&self) -> TxState;

    fn stats(&self) -> StatsSnapshot;

    /// Zero the transmission counters.
    fn reset_stats(&self);

    fn repeat_config(&self) -> &RepeatConfig;

    fn log_stream(&self) -> &LogStream;
}

/// Exclusive access to the transmitter, released on drop.
pub struct LineGuard<'r, T> {
    busy: &'r AtomicBool,
    transmitter: &'r mut T,
}

impl<T> Deref for LineGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.transmitter
    }
}

impl<T> DerefMut for LineGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.transmitter
    }
}

impl<T> Drop for LineGuard<'_, T> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// NEC IR remote: dispatcher over one transmitter.
///
/// # Example
///
/// ```ignore
/// static LOG: LogStream = LogStream::new();
/// static CONFIG: RepeatConfig = RepeatConfig::new();
///
/// let tx = BitBangTransmitter::new(line, busy_delay)?;
/// let remote = IrRemote::new(tx, scheduler, &CONFIG, &LOG);
///
/// remote.send_command(Command::PowerOn)?;   // 3 frames, ~0.5s
/// remote.send_raw_code(0x20DF40BF)?;        // 1 frame
/// ```
pub struct IrRemote<'a, T, S> {
    transmitter: UnsafeCell<T>,
    busy: AtomicBool,
    scheduler: S,
    config: &'a RepeatConfig,
    log: &'a LogStream,
    stats: TxStats,
}

// SAFETY: the transmitter is only reached through a LineGuard, and at most
// one guard exists at a time (compare_exchange on `busy`).
unsafe impl<T: Send, S: Sync> Sync for IrRemote<'_, T, S> {}

impl<'a, T: FrameTransmitter, S: Scheduler> IrRemote<'a, T, S> {
    /// Build a remote over a ready transmitter.
    ///
    /// Line configuration happens when the transmitter is built, so an
    /// `IrRemote` always holds a usable output.
    pub fn new(transmitter: T, scheduler: S, config: &'a RepeatConfig, log: &'a LogStream) -> Self {
        Self {
            transmitter: UnsafeCell::new(transmitter),
            busy: AtomicBool::new(false),
            scheduler,
            config,
            log,
            stats: TxStats::new(),
        }
    }

    /// Send a registered command: encode once, transmit per repeat policy.
    pub fn send_command(&self, command: Command) -> Result<(), IrError> {
        let code = command.code();
        let policy = self.config.policy();
        let frame = encode(code);

        tx_info!(
            self.log,
            self.scheduler.now_us(),
            "send {} code 0x{:08X} x{} gap {}ms",
            command,
            code,
            policy.count,
            policy.gap_ms
        );

        let mut line = self.acquire_line();
        let frames = transmit_repeated(&mut *line, &self.scheduler, &frame, policy);
        drop(line);

        self.stats.record_session(frames);
        tx_debug!(self.log, self.scheduler.now_us(), "{} done, {} frames", command, frames);
        Ok(())
    }

    /// Send the command at a raw registry index.
    ///
    /// Returns `Err(IrError::InvalidArgument)` for indices outside the
    /// registry, without touching the line.
    pub fn send_command_index(&self, index: usize) -> Result<(), IrError> {
        match Command::from_index(index) {
            Ok(command) => self.send_command(command),
            Err(e) => {
                self.stats.record_rejected();
                tx_error!(self.log, self.scheduler.now_us(), "invalid command index {}", index);
                Err(e)
            }
        }
    }

    /// Send the command with the given name (`power_on`, `temp_up`, ...).
    pub fn send_command_name(&self, name: &str) -> Result<(), IrError> {
        match Command::from_name(name) {
            Ok(command) => self.send_command(command),
            Err(e) => {
                self.stats.record_rejected();
                tx_error!(self.log, self.scheduler.now_us(), "invalid command '{}'", name);
                Err(e)
            }
        }
    }

    /// Send exactly one frame of `code`, bypassing the registry.
    pub fn send_raw_code(&self, code: u32) -> Result<(), IrError> {
        let frame = encode(code);

        tx_info!(self.log, self.scheduler.now_us(), "raw code 0x{:08X}", code);

        let mut line = self.acquire_line();
        transmit_repeated(&mut *line, &self.scheduler, &frame, RepeatPolicy::ONCE);
        drop(line);

        self.stats.record_raw();
        Ok(())
    }

    /// Code learning needs an IR receiver, which this hardware lacks.
    ///
    /// Always `Err(IrError::Unsupported)`; no placeholder code is invented.
    pub fn learn_code(&self) -> Result<u32, IrError> {
        tx_warn!(self.log, self.scheduler.now_us(), "learn requested, no IR receiver");
        Err(IrError::Unsupported)
    }

    #[inline]
    pub fn state(&self) -> TxState {
        if self.busy.load(Ordering::Acquire) {
            TxState::Transmitting
        } else {
            TxState::Idle
        }
    }

    #[inline]
    pub fn stats(&self) -> &TxStats {
        &self.stats
    }

    #[inline]
    pub fn repeat_config(&self) -> &RepeatConfig {
        self.config
    }

    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Take the transmitter back (e.g. to inspect a mock).
    pub fn into_transmitter(self) -> T {
        self.transmitter.into_inner()
    }

    /// Block (yielding) until the line is free, then own it.
    ///
    /// Not reentrant: a second call on the same thread while a guard is
    /// alive never returns.
    pub(crate) fn acquire_line(&self) -> LineGuard<'_, T> {
        let mut waited = false;

        while self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            waited = true;
            self.scheduler.delay_ms(LINE_WAIT_MS);
        }

        if waited {
            self.stats.record_contended();
        }

        LineGuard {
            busy: &self.busy,
            // SAFETY: `busy` was false and is now ours; no other guard exists
            transmitter: unsafe { &mut *self.transmitter.get() },
        }
    }
}

impl<T: FrameTransmitter, S: Scheduler> RemoteControl for IrRemote<'_, T, S> {
    fn send_command(&self, command: Command) -> Result<(), IrError> {
        IrRemote::send_command(self, command)
    }

    fn send_command_index(&self, index: usize) -> Result<(), IrError> {
        IrRemote::send_command_index(self, index)
    }

    fn send_command_name(&self, name: &str) -> Result<(), IrError> {
        IrRemote::send_command_name(self, name)
    }

    fn send_raw_code(&self, code: u32) -> Result<(), IrError> {
        IrRemote::send_raw_code(self, code)
    }

    fn learn_code(&self) -> Result<u32, IrError> {
        IrRemote::learn_code(self)
    }

    fn state(&self) -> TxState {
        IrRemote::state(self)
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn reset_stats(&self) {
        self.stats.reset();
    }

    fn repeat_config(&self) -> &RepeatConfig {
        self.config
    }

    fn log_stream(&self) -> &LogStream {
        self.log
    }
}
