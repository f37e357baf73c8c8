//! Log drain: turns queued [`LogEntry`] values into text lines.
//!
//! Line format: `[timestamp_us] LEVEL: message`
//!
//! The sink is any `core::fmt::Write`. On the device the firmware binary
//! wraps stdout (UART0); tests use a `String`.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Write one formatted entry, newline terminated.
pub fn write_entry(out: &mut dyn Write, entry: &LogEntry) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.text()
    )
}

/// Drain every pending entry into `out`.
///
/// If the stream dropped messages since the last drain, a warning line
/// with the count is written after the entries and the counter is reset.
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        if write_entry(out, &entry).is_err() {
            break;
        }
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] log dropped: {}", dropped);
        stream.reset_dropped();
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    #[test]
    fn test_entry_format() {
        let stream = LogStream::<4>::new();
        stream.push(1234567, LogLevel::Info, b"raw code 0x20DF10EF");

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 1);
        assert_eq!(out, "[   1234567] INFO: raw code 0x20DF10EF\n");
    }

    #[test]
    fn test_reports_dropped() {
        let stream = LogStream::<2>::new();
        for i in 0..3 {
            stream.push(i, LogLevel::Error, b"x");
        }

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 2);
        assert!(out.contains("ERROR: x"));
        assert!(out.ends_with("[WARN] log dropped: 1\n"));
        assert_eq!(stream.dropped(), 0);
    }
}
