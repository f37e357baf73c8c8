//! Lock-free logging for the transmission path.
//!
//! ```text
//! dispatcher / console          LogStream              drain task
//! ────────────────────          ─────────              ──────────
//! tx_info!() ─────────────▶ [E0][E1][E2]... ─────▶ stdout / UART
//! formats on stack           fixed-size ring         blocking ok
//! never blocks               drops when full
//! ```
//!
//! Log calls are made before and after a frame, never between edges: even
//! a non-blocking push costs time a 560µs mark cannot spare.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Maximum message length in bytes (longer messages are truncated).
pub const MAX_MSG_LEN: usize = 96;

/// Default ring size (entries). Must be a power of two.
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level, most severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Error),
            1 => Some(LogLevel::Warn),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    /// Parse `error`/`warn`/`info`/`debug` (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug]
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(name))
    }
}

/// One queued log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    pub timestamp_us: i64,
    pub level: LogLevel,
    pub len: u8,
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    pub const EMPTY: LogEntry = LogEntry {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text (invalid UTF-8 from truncation is cut at the last
    /// valid boundary).
    pub fn text(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Multi-producer, single-consumer log ring.
///
/// Producers reserve a slot with a CAS on `write_idx` and never wait. A slot
/// is published by storing `index + 1` in its sequence word; the single
/// drain task reads in order and stops at the first unpublished slot.
/// Entries below the stream's level are discarded at push time.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    published: [AtomicU32; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
    max_level: AtomicU8,
}

// SAFETY: each producer owns the slot it reserved; the drain task reads a
// slot only after its sequence word says it is published.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

#[allow(clippy::declare_interior_mutable_const)]
const UNPUBLISHED: AtomicU32 = AtomicU32::new(0);

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            published: [UNPUBLISHED; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            max_level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Most verbose level still recorded.
    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.max_level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Info)
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.max_level.store(level as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level()
    }

    /// Queue a message. Returns `false` if filtered out or dropped.
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        if !self.enabled(level) {
            return false;
        }

        let mut write = self.write_idx.load(Ordering::Acquire);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let slot = (write as usize) & Self::MASK;
        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: slot is exclusively ours until it is published and drained
        unsafe {
            let entry = &mut (*self.entries.get())[slot];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }

        self.published[slot].store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Take the oldest entry. Single consumer only.
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let slot = (read as usize) & Self::MASK;

        if self.published[slot].load(Ordering::Acquire) != read.wrapping_add(1) {
            return None;
        }

        // SAFETY: single consumer; the producer published this slot
        let entry = unsafe { (*self.entries.get())[slot] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        self.write_idx.load(Ordering::Acquire).wrapping_sub(read)
    }

    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `args` into `buf`, truncating. Returns bytes written.
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    struct Cursor<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl core::fmt::Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let n = s.len().min(self.buf.len() - self.pos);
            self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
            self.pos += n;
            Ok(())
        }
    }

    let mut cursor = Cursor { buf, pos: 0 };
    let _ = core::fmt::write(&mut cursor, args);
    cursor.pos
}

/// Log to a [`LogStream`] without blocking.
///
/// ```ignore
/// tx_log!(LogLevel::Info, TX_LOG_STREAM, now_us, "sending {}", cmd);
/// ```
#[macro_export]
macro_rules! tx_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        if $stream.enabled($level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $stream.push($timestamp, $level, &buf[..len]);
        }
    }};
}

#[macro_export]
macro_rules! tx_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let stream = LogStream::<8>::new();

        assert!(stream.push(1000, LogLevel::Info, b"frame sent"));
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.text(), "frame sent");
        assert!(stream.drain().is_none());
    }

    #[test]
    fn test_full_ring_drops() {
        let stream = LogStream::<2>::new();

        assert!(stream.push(1, LogLevel::Info, b"a"));
        assert!(stream.push(2, LogLevel::Info, b"b"));
        assert!(!stream.push(3, LogLevel::Info, b"c"));
        assert_eq!(stream.dropped(), 1);
        assert_eq!(stream.pending(), 2);

        assert_eq!(stream.drain().unwrap().text(), "a");
        assert!(stream.push(4, LogLevel::Info, b"d"));
        assert_eq!(stream.drain().unwrap().text(), "b");
        assert_eq!(stream.drain().unwrap().text(), "d");
    }

    #[test]
    fn test_level_filter() {
        let stream = LogStream::<8>::new();

        assert!(!stream.push(0, LogLevel::Debug, b"hidden"));
        stream.set_level(LogLevel::Debug);
        assert!(stream.push(0, LogLevel::Debug, b"shown"));

        stream.set_level(LogLevel::Error);
        tx_warn!(stream, 0, "code 0x{:08X}", 0x20DF10EFu32);
        assert_eq!(stream.pending(), 1);
    }

    #[test]
    fn test_macro_formats() {
        let stream = LogStream::<8>::new();
        tx_info!(stream, 5, "code 0x{:08X}", 0x20DF10EFu32);
        assert_eq!(stream.drain().unwrap().text(), "code 0x20DF10EF");
    }

    #[test]
    fn test_truncation() {
        let mut buf = [0u8; 4];
        assert_eq!(format_to_buffer(&mut buf, format_args!("{}", 123456)), 4);
        assert_eq!(&buf, b"1234");
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::from_name("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_name("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_name("trace"), None);
    }

    #[test]
    fn test_concurrent_producers() {
        use std::sync::Arc;
        use std::thread;

        let stream = Arc::new(LogStream::<64>::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let stream = Arc::clone(&stream);
                thread::spawn(move || {
                    for i in 0..8 {
                        let msg = format!("t{} m{}", t, i);
                        stream.push(i, LogLevel::Info, msg.as_bytes());
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let mut count = 0;
        while stream.drain().is_some() {
            count += 1;
        }
        assert_eq!(count, 32);
    }
}
