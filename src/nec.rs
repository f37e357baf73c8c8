//! NEC frame encoder.
//!
//! Pure logic, no hardware dependencies. Turns a 32-bit code into the
//! mark/space sequence of one NEC frame. Fully testable on host.
//!
//! # Frame Layout
//!
//! ```text
//!  ┌────────┐        ┌─┐   ┌─┐ ┌─┐        ┌─┐
//!  │  9000  │  4500  │ │1690│ │ │ │  ...   │ │ trailer
//! ─┘        └────────┘ └───┘ └─┘ └─ ... ──┘ └──────────
//!    header mark/space   bit 31   bit 30      560 mark
//! ```
//!
//! - Header: 9000µs mark + 4500µs space
//! - 32 bits, MSB first: 560µs mark + 1690µs (one) or 560µs (zero) space
//! - Trailer: 560µs mark, then the line returns low
//!
//! 1 + 1 + 32 + 32 + 1 = 67 timed intervals per frame.

/// Number of timed intervals in one NEC frame.
pub const FRAME_LEN: usize = 67;

/// Number of data bits per frame.
pub const DATA_BITS: u32 = 32;

/// Output logic level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Emitter active (mark).
    High,
    /// Emitter off (space).
    Low,
}

/// One timed interval on the output line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    pub level: Level,
    pub duration_us: u32,
}

impl Pulse {
    /// Mark of the given length.
    #[inline]
    pub const fn mark(duration_us: u32) -> Self {
        Self { level: Level::High, duration_us }
    }

    /// Space of the given length.
    #[inline]
    pub const fn space(duration_us: u32) -> Self {
        Self { level: Level::Low, duration_us }
    }

    const EMPTY: Pulse = Pulse::space(0);
}

/// NEC protocol timing, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NecTiming {
    pub header_mark_us: u32,
    pub header_space_us: u32,
    pub bit_mark_us: u32,
    pub one_space_us: u32,
    pub zero_space_us: u32,
    pub trailer_mark_us: u32,
}

/// Standard NEC timing.
pub const NEC_TIMING: NecTiming = NecTiming {
    header_mark_us: 9000,
    header_space_us: 4500,
    bit_mark_us: 560,
    one_space_us: 1690,
    zero_space_us: 560,
    trailer_mark_us: 560,
};

impl NecTiming {
    /// Space length carrying a data bit.
    #[inline]
    pub const fn bit_space_us(&self, bit: bool) -> u32 {
        if bit {
            self.one_space_us
        } else {
            self.zero_space_us
        }
    }
}

/// One encoded NEC frame.
///
/// Transient value: built for one transmission and dropped afterwards.
/// Fixed size, lives on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pulses: [Pulse; FRAME_LEN],
}

impl Frame {
    /// The timed intervals in transmission order.
    #[inline]
    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Iterate over intervals in transmission order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Pulse> {
        self.pulses.iter()
    }

    /// Number of intervals (always `FRAME_LEN`).
    #[inline]
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Total on-air duration of the frame in microseconds.
    pub fn duration_us(&self) -> u32 {
        self.pulses.iter().map(|p| p.duration_us).sum()
    }

    /// Space that carries data bit `bit` (31 = MSB).
    ///
    /// Returns `None` for `bit >= 32`.
    pub fn bit_space(&self, bit: u32) -> Option<Pulse> {
        if bit >= DATA_BITS {
            return None;
        }
        // header (2) + pairs for bits 31..bit, space is the second of the pair
        let pair = (DATA_BITS - 1 - bit) as usize;
        Some(self.pulses[2 + pair * 2 + 1])
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a Pulse;
    type IntoIter = core::slice::Iter<'a, Pulse>;

    fn into_iter(self) -> Self::IntoIter {
        self.pulses.iter()
    }
}

/// Encode a code with standard NEC timing.
///
/// Every `u32` is a legal input; validity of a code is the registry's
/// concern, not the encoder's.
///
/// # Example
///
/// ```
/// use rust_aircon_ir_remote::nec::{encode, Level, FRAME_LEN};
///
/// let frame = encode(0x20DF10EF);
/// assert_eq!(frame.len(), FRAME_LEN);
/// assert_eq!(frame.pulses()[0].level, Level::High);
/// assert_eq!(frame.pulses()[0].duration_us, 9000);
/// ```
#[inline]
pub fn encode(code: u32) -> Frame {
    encode_with(code, &NEC_TIMING)
}

/// Encode a code with explicit timing.
pub fn encode_with(code: u32, timing: &NecTiming) -> Frame {
    let mut pulses = [Pulse::EMPTY; FRAME_LEN];

    pulses[0] = Pulse::mark(timing.header_mark_us);
    pulses[1] = Pulse::space(timing.header_space_us);

    let mut idx = 2;
    for bit in (0..DATA_BITS).rev() {
        let set = code & (1 << bit) != 0;
        pulses[idx] = Pulse::mark(timing.bit_mark_us);
        pulses[idx + 1] = Pulse::space(timing.bit_space_us(set));
        idx += 2;
    }

    pulses[idx] = Pulse::mark(timing.trailer_mark_us);

    Frame { pulses }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_trailer() {
        let frame = encode(0);
        assert_eq!(frame.pulses()[0], Pulse::mark(9000));
        assert_eq!(frame.pulses()[1], Pulse::space(4500));
        assert_eq!(frame.pulses()[FRAME_LEN - 1], Pulse::mark(560));
    }

    #[test]
    fn test_all_zero_and_all_one() {
        let zeros = encode(0);
        let ones = encode(u32::MAX);
        for bit in 0..32 {
            assert_eq!(zeros.bit_space(bit), Some(Pulse::space(560)));
            assert_eq!(ones.bit_space(bit), Some(Pulse::space(1690)));
        }
    }

    #[test]
    fn test_msb_first() {
        let frame = encode(0x8000_0000);
        assert_eq!(frame.pulses()[3], Pulse::space(1690));
        assert_eq!(frame.pulses()[5], Pulse::space(560));
    }

    #[test]
    fn test_duration() {
        // 9000 + 4500 + 32*560 + 32*560 + 560 for an all-zero code
        assert_eq!(encode(0).duration_us(), 9000 + 4500 + 64 * 560 + 560);
        assert_eq!(encode(u32::MAX).duration_us(), 9000 + 4500 + 32 * (560 + 1690) + 560);
    }

    #[test]
    fn test_bit_space_out_of_range() {
        assert_eq!(encode(1).bit_space(32), None);
    }
}
