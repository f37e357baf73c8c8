//! Command registry tests

use rust_aircon_ir_remote::command::code_for_index;
use rust_aircon_ir_remote::{Command, IrError, CODES, COMMAND_COUNT};

#[test]
fn test_registry_has_ten_entries() {
    assert_eq!(COMMAND_COUNT, 10);
    assert_eq!(Command::ALL.len(), 10);
}

#[test]
fn test_known_codes() {
    assert_eq!(Command::PowerOn.code(), 0x20DF10EF);
    assert_eq!(Command::ModeCool.code(), 0x20DF08F7);
    assert_eq!(Command::ModeHeat.code(), 0x20DF0CF3);
    assert_eq!(Command::ModeFan.code(), 0x20DF0EF1);
    assert_eq!(Command::TempUp.code(), 0x20DF40BF);
    assert_eq!(Command::TempDown.code(), 0x20DFC03F);
    assert_eq!(Command::FanSpeed1.code(), 0x20DF8877);
    assert_eq!(Command::FanSpeed2.code(), 0x20DF48B7);
    assert_eq!(Command::FanSpeed3.code(), 0x20DFC837);
}

#[test]
fn test_power_on_and_off_share_a_code() {
    // The unit toggles power on a single code
    assert_eq!(Command::PowerOn.code(), Command::PowerOff.code());
    assert_ne!(Command::PowerOn, Command::PowerOff);
}

#[test]
fn test_index_boundary() {
    assert_eq!(code_for_index(9), Ok(0x20DFC837));
    assert_eq!(code_for_index(10), Err(IrError::InvalidArgument));
    assert_eq!(code_for_index(usize::MAX), Err(IrError::InvalidArgument));

    assert_eq!(Command::from_index(9), Ok(Command::FanSpeed3));
    assert_eq!(Command::from_index(10), Err(IrError::InvalidArgument));
}

#[test]
fn test_index_round_trip() {
    for (i, cmd) in Command::ALL.iter().enumerate() {
        assert_eq!(cmd.index(), i);
        assert_eq!(Command::from_index(i), Ok(*cmd));
        assert_eq!(code_for_index(i), Ok(CODES[i]));
    }
}

#[test]
fn test_lookup_by_name() {
    assert_eq!(Command::from_name("temp_up"), Ok(Command::TempUp));
    assert_eq!(Command::from_name("FAN_2"), Ok(Command::FanSpeed2));
    assert_eq!("mode_heat".parse::<Command>(), Ok(Command::ModeHeat));
    assert_eq!(Command::from_name("turbo"), Err(IrError::InvalidArgument));
    assert_eq!(Command::from_name(""), Err(IrError::InvalidArgument));
}

#[test]
fn test_display_uses_name() {
    assert_eq!(format!("{}", Command::PowerOn), "power_on");
    assert_eq!(Command::FanSpeed1.to_string(), "fan_1");
}
