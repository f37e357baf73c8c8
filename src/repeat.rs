//! Repeat controller.
//!
//! IR reception is lossy (line of sight, ambient IR), and there is no
//! acknowledgment. A command is therefore sent as a fixed burst of
//! identical frames, each followed by a yielding pause:
//!
//! ```text
//! [frame ~68ms] pause 100ms [frame] pause 100ms [frame] pause 100ms
//! ```
//!
//! Frames are never interrupted; the pauses are where other tasks run.

use crate::hal::timing::Scheduler;
use crate::nec::Frame;
use crate::transmitter::FrameTransmitter;

/// Default number of frames per command.
pub const DEFAULT_REPEAT_COUNT: u8 = 3;

/// Default pause after each frame, in milliseconds.
pub const DEFAULT_REPEAT_GAP_MS: u32 = 100;

/// Reliability/latency trade-off for one command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatPolicy {
    /// Frames per command (>= 1).
    pub count: u8,
    /// Yielding pause after each frame.
    pub gap_ms: u32,
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self {
            count: DEFAULT_REPEAT_COUNT,
            gap_ms: DEFAULT_REPEAT_GAP_MS,
        }
    }
}

impl RepeatPolicy {
    /// Single frame, no pause (raw code sends).
    pub const ONCE: RepeatPolicy = RepeatPolicy { count: 1, gap_ms: 0 };

    /// Upper bound for a session, given the frame length.
    ///
    /// Callers can rely on this as an implicit timeout.
    pub fn session_duration_us(&self, frame: &Frame) -> u64 {
        self.count as u64 * (frame.duration_us() as u64 + self.gap_ms as u64 * 1000)
    }
}

/// Send `frame` according to `policy`.
///
/// Returns the number of frames put on air. A zero count still sends one
/// frame: a command request never turns into silence.
pub fn transmit_repeated<T, S>(
    transmitter: &mut T,
    scheduler: &S,
    frame: &Frame,
    policy: RepeatPolicy,
) -> u32
where
    T: FrameTransmitter + ?Sized,
    S: Scheduler + ?Sized,
{
    let count = policy.count.max(1) as u32;

    for _ in 0..count {
        transmitter.transmit(frame);
        if policy.gap_ms > 0 {
            scheduler.delay_ms(policy.gap_ms);
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nec::encode;
    use core::cell::{Cell, RefCell};

    #[derive(Debug, PartialEq)]
    enum Step {
        Frame,
        Pause(u32),
    }

    struct Log(RefCell<Vec<Step>>);

    struct Tx<'a>(&'a Log);

    impl FrameTransmitter for Tx<'_> {
        fn transmit(&mut self, _frame: &Frame) {
            self.0 .0.borrow_mut().push(Step::Frame);
        }
    }

    impl Scheduler for Log {
        fn delay_ms(&self, ms: u32) {
            self.0.borrow_mut().push(Step::Pause(ms));
        }

        fn now_us(&self) -> i64 {
            0
        }
    }

    #[test]
    fn test_default_policy_sends_three_with_pauses() {
        let log = Log(RefCell::new(Vec::new()));
        let sent = transmit_repeated(&mut Tx(&log), &log, &encode(1), RepeatPolicy::default());

        assert_eq!(sent, 3);
        assert_eq!(
            *log.0.borrow(),
            vec![
                Step::Frame,
                Step::Pause(100),
                Step::Frame,
                Step::Pause(100),
                Step::Frame,
                Step::Pause(100),
            ]
        );
    }

    #[test]
    fn test_once_has_no_pause() {
        let log = Log(RefCell::new(Vec::new()));
        transmit_repeated(&mut Tx(&log), &log, &encode(1), RepeatPolicy::ONCE);
        assert_eq!(*log.0.borrow(), vec![Step::Frame]);
    }

    #[test]
    fn test_zero_count_still_sends() {
        let frames = Cell::new(0);
        struct Count<'a>(&'a Cell<u32>);
        impl FrameTransmitter for Count<'_> {
            fn transmit(&mut self, _frame: &Frame) {
                self.0.set(self.0.get() + 1);
            }
        }
        let log = Log(RefCell::new(Vec::new()));
        let policy = RepeatPolicy { count: 0, gap_ms: 0 };

        assert_eq!(transmit_repeated(&mut Count(&frames), &log, &encode(1), policy), 1);
        assert_eq!(frames.get(), 1);
    }

    #[test]
    fn test_session_duration() {
        let frame = encode(0);
        let policy = RepeatPolicy::default();
        let expected = 3 * (frame.duration_us() as u64 + 100_000);
        assert_eq!(policy.session_duration_us(&frame), expected);
    }
}
