//! Transmission statistics.
//!
//! Lock-free counters, updated by the dispatcher and read by the console
//! (or any diagnostics surface) from another task.

use core::sync::atomic::{AtomicU32, Ordering};

/// Counters since boot. Never reset except by [`TxStats::reset`].
pub struct TxStats {
    /// Command sessions completed (one per `send_command`).
    sessions: AtomicU32,
    /// Frames put on air (all paths).
    frames: AtomicU32,
    /// Raw code sends completed.
    raw_sends: AtomicU32,
    /// Requests refused before touching the line.
    rejected: AtomicU32,
    /// Requests that had to wait for another transmission to finish.
    contended: AtomicU32,
}

impl TxStats {
    pub const fn new() -> Self {
        Self {
            sessions: AtomicU32::new(0),
            frames: AtomicU32::new(0),
            raw_sends: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
            contended: AtomicU32::new(0),
        }
    }

    #[inline]
    pub fn record_session(&self, frames: u32) {
        self.frames.fetch_add(frames, Ordering::Relaxed);
        self.sessions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_raw(&self) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        self.raw_sends.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_contended(&self) {
        self.contended.fetch_add(1, Ordering::Relaxed);
    }

    /// Clear all counters.
    pub fn reset(&self) {
        self.sessions.store(0, Ordering::Relaxed);
        self.frames.store(0, Ordering::Relaxed);
        self.raw_sends.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.contended.store(0, Ordering::Relaxed);
    }

    /// Get a snapshot of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sessions: self.sessions.load(Ordering::Relaxed),
            frames: self.frames.load(Ordering::Relaxed),
            raw_sends: self.raw_sends.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            contended: self.contended.load(Ordering::Relaxed),
        }
    }
}

impl Default for TxStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`TxStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub sessions: u32,
    pub frames: u32,
    pub raw_sends: u32,
    pub rejected: u32,
    pub contended: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = TxStats::new();

        stats.record_session(3);
        stats.record_session(3);
        stats.record_raw();
        stats.record_rejected();

        let snap = stats.snapshot();
        assert_eq!(snap.sessions, 2);
        assert_eq!(snap.frames, 7);
        assert_eq!(snap.raw_sends, 1);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.contended, 0);
    }

    #[test]
    fn test_reset() {
        let stats = TxStats::new();
        stats.record_raw();
        stats.record_contended();
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
