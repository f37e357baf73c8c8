//! Frame transmitters.
//!
//! A transmitter reproduces a [`Frame`] on the IR output in real time and
//! leaves the line low afterwards. Two backends:
//!
//! - [`BitBangTransmitter`]: toggles a GPIO and spins between edges.
//!   Works on every target and against host mocks.
//! - `RmtTransmitter` (ESP-IDF, see `hal::esp`): hands the frame to the RMT
//!   peripheral, which generates the edges (and the carrier) in hardware.
//!
//! Both consume the same `Frame`, so the encoder contract does not change
//! with the backend.

use crate::error::IrError;
use crate::hal::timing::{BusyDelay, OutputLine};
use crate::nec::{Frame, Level};

/// Something that can put one frame on air.
///
/// `transmit` blocks for the full frame duration. It cannot fail: the
/// channel has no acknowledgment, and line setup errors are reported by
/// the constructor.
pub trait FrameTransmitter {
    fn transmit(&mut self, frame: &Frame);
}

impl<T: FrameTransmitter + ?Sized> FrameTransmitter for &mut T {
    #[inline]
    fn transmit(&mut self, frame: &Frame) {
        (**self).transmit(frame)
    }
}

/// GPIO bit-banging transmitter.
///
/// # Timing
///
/// Every hold goes through [`BusyDelay`], which must not yield. Run this
/// from a task that nothing preempts for ~70ms, or a 1690µs space can
/// stretch past what a receiver accepts (±10%).
pub struct BitBangTransmitter<L, D> {
    line: L,
    delay: D,
}

impl<L: OutputLine, D: BusyDelay> BitBangTransmitter<L, D> {
    /// Configure the output line (driven low) and build the transmitter.
    ///
    /// Returns `Err(IrError::InitFailed)` if the line cannot be configured.
    pub fn new(mut line: L, delay: D) -> Result<Self, IrError> {
        line.configure()?;
        Ok(Self { line, delay })
    }
}

impl<L: OutputLine, D: BusyDelay> FrameTransmitter for BitBangTransmitter<L, D> {
    fn transmit(&mut self, frame: &Frame) {
        for pulse in frame {
            self.line.set_level(pulse.level);
            self.delay.delay_us(pulse.duration_us);
        }
        // End of frame
        self.line.set_level(Level::Low);
    }
}
