//! RustAirconIrRemote - Main entry point
//!
//! On the ESP32:
//! 1. Configure the IR LED output (GPIO2, bit-bang or RMT with `rmt`)
//! 2. Spawn the log drain thread on Core 1, lowest priority
//! 3. Run the serial console on stdin (Core 0, raised priority)
//!
//! Bit-banged frames run inside the console task, so nothing on Core 0 may
//! outrank it while a frame is on air.
//!
//! On a host build the same console runs once over the command line
//! arguments against a tracing transmitter (dry run, nothing is emitted):
//!
//! ```text
//! irremote send power_on
//! irremote raw 0x20DF40BF
//! ```

use core::fmt;

use rust_aircon_ir_remote::console::{execute, parse_line};

/// `core::fmt::Write` over stdout.
struct StdoutSink;

impl fmt::Write for StdoutSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        use std::io::Write;
        std::io::stdout().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    use esp_idf_svc::hal::delay::FreeRtos;

    esp_idf_svc::sys::link_patches();

    if let Err(e) = firmware::run() {
        println!("FATAL: {}", e);
        // No output line, nothing to do: stay up so the console log is readable
        loop {
            FreeRtos::delay_ms(1000);
        }
    }
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::cpu::Core;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;

    use rust_aircon_ir_remote::hal::esp::EspScheduler;
    use rust_aircon_ir_remote::hal::Scheduler as _;
    use rust_aircon_ir_remote::log_drain::drain_to;
    use rust_aircon_ir_remote::config::{IR_LED_PIN, LOG_DRAIN_PRIORITY, TX_TASK_PRIORITY};
    use rust_aircon_ir_remote::{tx_info, IrError, IrRemote, CONFIG, TX_LOG_STREAM};

    use super::{execute, parse_line, StdoutSink};

    /// Log drain period.
    const DRAIN_PERIOD_MS: u32 = 20;

    pub fn run() -> Result<(), IrError> {
        let peripherals = Peripherals::take()?;

        #[cfg(not(feature = "rmt"))]
        let transmitter = {
            use esp_idf_svc::hal::gpio::OutputPin;
            use rust_aircon_ir_remote::hal::esp::{busy_delay, output_line};
            use rust_aircon_ir_remote::BitBangTransmitter;

            // gpio2 is IR_LED_PIN; keep both in step
            let line = output_line(peripherals.pins.gpio2.downgrade_output())?;
            BitBangTransmitter::new(line, busy_delay())?
        };

        #[cfg(feature = "rmt")]
        let transmitter = rust_aircon_ir_remote::hal::esp::RmtTransmitter::new(
            peripherals.rmt.channel0,
            // IR_LED_PIN
            peripherals.pins.gpio2,
        )?;

        let remote = IrRemote::new(transmitter, EspScheduler, &CONFIG, &TX_LOG_STREAM);
        tx_info!(TX_LOG_STREAM, EspScheduler.now_us(), "{} ready on GPIO{}", env!("VERSION_STRING"), IR_LED_PIN);

        // Drain on Core 1 below the console task: UART writes never land
        // inside a frame
        ThreadSpawnConfiguration {
            name: Some(b"log-drain\0"),
            stack_size: 4096,
            priority: LOG_DRAIN_PRIORITY,
            pin_to_core: Some(Core::Core1),
            ..Default::default()
        }
        .set()?;

        std::thread::Builder::new()
            .stack_size(4096)
            .spawn(|| loop {
                drain_to(&TX_LOG_STREAM, &mut StdoutSink);
                FreeRtos::delay_ms(DRAIN_PERIOD_MS);
            })
            .map_err(|_| IrError::InitFailed { code: -1 })?;

        ThreadSpawnConfiguration::default().set()?;

        // SAFETY: null handle means the calling task (main, Core 0)
        unsafe {
            esp_idf_svc::sys::vTaskPrioritySet(core::ptr::null_mut(), TX_TASK_PRIORITY as u32);
        }

        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(n) if n > 0 => {}
                // UART VFS is non-blocking: nothing typed yet
                _ => {
                    FreeRtos::delay_ms(50);
                    continue;
                }
            }

            let cmd = parse_line(&line);
            if let Err(e) = execute(&cmd, &remote, &mut StdoutSink) {
                println!("{}", e);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use std::time::{Duration, Instant};

    use rust_aircon_ir_remote::hal::Scheduler;
    use rust_aircon_ir_remote::log_drain::drain_to;
    use rust_aircon_ir_remote::nec::{Frame, Level};
    use rust_aircon_ir_remote::{FrameTransmitter, IrRemote, CONFIG, TX_LOG_STREAM};

    /// Prints each frame instead of driving a pin.
    struct TraceTransmitter;

    impl FrameTransmitter for TraceTransmitter {
        fn transmit(&mut self, frame: &Frame) {
            let mut out = String::new();
            for p in frame {
                let tag = match p.level {
                    Level::High => 'H',
                    Level::Low => 'L',
                };
                out.push_str(&format!("{}{} ", tag, p.duration_us));
            }
            println!("frame {}us: {}L", frame.duration_us(), out);
        }
    }

    struct HostScheduler {
        start: Instant,
    }

    impl Scheduler for HostScheduler {
        fn delay_ms(&self, ms: u32) {
            std::thread::sleep(Duration::from_millis(ms as u64));
        }

        fn now_us(&self) -> i64 {
            self.start.elapsed().as_micros() as i64
        }
    }

    let line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let line = if line.is_empty() { "help".to_string() } else { line };

    let remote = IrRemote::new(
        TraceTransmitter,
        HostScheduler { start: Instant::now() },
        &CONFIG,
        &TX_LOG_STREAM,
    );

    let cmd = parse_line(&line);
    let result = execute(&cmd, &remote, &mut StdoutSink);
    drain_to(&TX_LOG_STREAM, &mut StdoutSink);

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
