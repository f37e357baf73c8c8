//! ESP-IDF implementations of the timing and output capabilities.
//!
//! | capability      | ESP-IDF primitive              | yields? |
//! |-----------------|--------------------------------|---------|
//! | `OutputLine`    | `PinDriver` (GPIO, push-pull)  | -       |
//! | `BusyDelay`     | `Ets` (ROM busy loop)          | no      |
//! | `Scheduler`     | `FreeRtos::delay_ms`           | yes     |
//! | timestamps      | `esp_timer_get_time`           | -       |
//!
//! `RmtTransmitter` replaces bit-banging with the RMT peripheral: the frame
//! becomes a list of RMT items and the edges (and the 38 kHz carrier) are
//! generated in hardware, so task preemption cannot stretch a space.

use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::rmt::config::{CarrierConfig, DutyPercent, TransmitConfig};
use esp_idf_svc::hal::rmt::{PinState, Pulse, PulseTicks, RmtChannel, TxRmtDriver, VariableLengthSignal};
use esp_idf_svc::hal::units::FromValueType;
use esp_idf_svc::sys::EspError;

use crate::config::{CARRIER_DUTY_PERCENT, CARRIER_HZ};
use crate::error::IrError;
use crate::hal::timing::{HalDelay, HalOutput, Scheduler};
use crate::log_globals::TX_LOG_STREAM;
use crate::nec::{Frame, Level};
use crate::transmitter::FrameTransmitter;
use crate::tx_error;

/// GPIO output line on ESP-IDF.
pub type EspLine = HalOutput<PinDriver<'static, AnyOutputPin, Output>>;

/// Busy microsecond delay on ESP-IDF.
pub type EspBusyDelay = HalDelay<Ets>;

impl From<EspError> for IrError {
    fn from(e: EspError) -> Self {
        IrError::InitFailed { code: e.code() }
    }
}

/// Configure `pin` as a push-pull output for the IR LED.
///
/// The line is driven low by `OutputLine::configure` when the transmitter
/// is built.
pub fn output_line(pin: AnyOutputPin) -> Result<EspLine, IrError> {
    let driver = PinDriver::output(pin)?;
    Ok(HalOutput::new(driver))
}

/// ROM busy-wait delay (does not yield).
pub fn busy_delay() -> EspBusyDelay {
    HalDelay::new(Ets)
}

/// FreeRTOS scheduler services.
#[derive(Clone, Copy, Debug, Default)]
pub struct EspScheduler;

impl Scheduler for EspScheduler {
    #[inline]
    fn delay_ms(&self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }

    #[inline]
    fn now_us(&self) -> i64 {
        // SAFETY: esp_timer is started by the IDF before app_main
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }
}

/// Frame transmitter backed by an RMT TX channel.
pub struct RmtTransmitter<'d> {
    driver: TxRmtDriver<'d>,
}

impl<'d> RmtTransmitter<'d> {
    /// Set up an RMT channel at 1 tick/µs with a modulated carrier and an
    /// idle level of low.
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> Result<Self, IrError> {
        let carrier = CarrierConfig::new()
            .duty_percent(DutyPercent::new(CARRIER_DUTY_PERCENT)?)
            .frequency(CARRIER_HZ.Hz());

        // APB 80 MHz / 80 = 1 tick per microsecond
        let config = TransmitConfig::new()
            .clock_divider(80)
            .carrier(Some(carrier))
            .idle(Some(PinState::Low));

        let driver = TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self { driver })
    }

    fn send(&mut self, frame: &Frame) -> Result<(), EspError> {
        let mut signal = VariableLengthSignal::new();

        for pulse in frame {
            let state = match pulse.level {
                Level::High => PinState::High,
                Level::Low => PinState::Low,
            };
            // Longest NEC interval (9000) fits the 15-bit tick counter
            let ticks = PulseTicks::new(pulse.duration_us as u16)?;
            signal.push(&[Pulse::new(state, ticks)])?;
        }

        self.driver.start_blocking(&signal)
    }
}

impl FrameTransmitter for RmtTransmitter<'_> {
    fn transmit(&mut self, frame: &Frame) {
        if let Err(e) = self.send(frame) {
            let now = EspScheduler.now_us();
            tx_error!(TX_LOG_STREAM, now, "rmt transmit failed: {}", e);
        }
    }
}
