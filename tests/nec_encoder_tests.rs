//! NEC frame encoder tests

use rust_aircon_ir_remote::nec::{encode, encode_with, Level, Pulse, FRAME_LEN, NEC_TIMING};
use rust_aircon_ir_remote::CODES;

fn bits_from_spaces(code: u32) -> u32 {
    let frame = encode(code);
    let mut value = 0u32;
    for i in 0..32 {
        let space = frame.pulses()[2 + i * 2 + 1];
        value <<= 1;
        if space.duration_us == 1690 {
            value |= 1;
        }
    }
    value
}

#[test]
fn test_frame_has_67_pulses() {
    for code in [0u32, 1, 0x20DF10EF, 0xFFFF_FFFF, 0x8000_0000] {
        assert_eq!(encode(code).len(), FRAME_LEN);
        assert_eq!(encode(code).pulses().len(), 67);
    }
}

#[test]
fn test_header_and_trailer() {
    let frame = encode(0x20DF40BF);
    let p = frame.pulses();

    assert_eq!(p[0], Pulse { level: Level::High, duration_us: 9000 });
    assert_eq!(p[1], Pulse { level: Level::Low, duration_us: 4500 });
    assert_eq!(p[66], Pulse { level: Level::High, duration_us: 560 });
}

#[test]
fn test_levels_alternate() {
    let frame = encode(0x20DFC837);
    for (i, pulse) in frame.iter().enumerate() {
        let expected = if i % 2 == 0 { Level::High } else { Level::Low };
        assert_eq!(pulse.level, expected, "pulse {}", i);
    }
}

#[test]
fn test_bit_marks_are_560() {
    let frame = encode(0xA5A5_5A5A);
    for i in 0..32 {
        assert_eq!(frame.pulses()[2 + i * 2].duration_us, 560);
    }
}

#[test]
fn test_power_on_bit_pattern() {
    // 0010 0000 1101 1111 0001 0000 1110 1111
    let frame = encode(0x20DF10EF);
    let expected = [
        0, 0, 1, 0, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 1, 1, 1, 1,
    ];

    for (i, bit) in expected.iter().enumerate() {
        let space = frame.pulses()[3 + i * 2];
        let want = if *bit == 1 { 1690 } else { 560 };
        assert_eq!(space.duration_us, want, "bit {}", i);
    }
}

#[test]
fn test_all_zero_and_all_one() {
    let zeros = encode(0);
    let ones = encode(0xFFFF_FFFF);

    for i in 0..32 {
        assert_eq!(zeros.pulses()[3 + i * 2].duration_us, 560);
        assert_eq!(ones.pulses()[3 + i * 2].duration_us, 1690);
    }
}

#[test]
fn test_msb_is_sent_first() {
    let frame = encode(0x8000_0000);
    assert_eq!(frame.pulses()[3].duration_us, 1690);
    assert_eq!(frame.pulses()[65].duration_us, 560);

    let frame = encode(0x0000_0001);
    assert_eq!(frame.pulses()[3].duration_us, 560);
    assert_eq!(frame.pulses()[65].duration_us, 1690);
}

#[test]
fn test_spaces_decode_back_to_code() {
    for code in CODES {
        assert_eq!(bits_from_spaces(code), code);
    }
}

#[test]
fn test_bit_space_accessor() {
    let frame = encode(0x0000_0001);
    assert_eq!(frame.bit_space(0).map(|p| p.duration_us), Some(1690));
    assert_eq!(frame.bit_space(31).map(|p| p.duration_us), Some(560));
    assert_eq!(frame.bit_space(32), None);
}

#[test]
fn test_encoding_is_deterministic() {
    assert_eq!(encode(0x20DF08F7), encode(0x20DF08F7));
    assert_ne!(encode(0x20DF08F7), encode(0x20DF0CF3));
}

#[test]
fn test_duration() {
    // 9000 + 4500 + 32 * 560 + ones * 1690 + zeros * 560 + 560
    let ones = 0x20DF10EFu32.count_ones();
    let expected = 9000 + 4500 + 32 * 560 + ones * 1690 + (32 - ones) * 560 + 560;
    assert_eq!(encode(0x20DF10EF).duration_us(), expected);
}

#[test]
fn test_encode_with_custom_timing() {
    let mut timing = NEC_TIMING;
    timing.one_space_us = 1600;
    timing.zero_space_us = 500;

    let frame = encode_with(0x8000_0000, &timing);
    assert_eq!(frame.pulses()[3].duration_us, 1600);
    assert_eq!(frame.pulses()[5].duration_us, 500);
    assert_eq!(frame.pulses()[0].duration_us, 9000);
}
