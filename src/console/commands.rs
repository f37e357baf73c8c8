//! Command handlers

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::command::Command;
use crate::config::{find_param, set_param, PARAMS};
use crate::logging::LogLevel;
use crate::remote::{RemoteControl, TxState};

type Handler = fn(&ParsedCommand<'_>, &dyn RemoteControl, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub usage: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", usage: "help [cmd]", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "list", usage: "list", brief: "List IR commands and codes", handler: cmd_list },
    CommandDescriptor { name: "send", usage: "send <name|index>", brief: "Send IR command (repeated)", handler: cmd_send },
    CommandDescriptor { name: "raw", usage: "raw <hex>", brief: "Send one frame of a raw code", handler: cmd_raw },
    CommandDescriptor { name: "learn", usage: "learn", brief: "Capture a code (needs receiver)", handler: cmd_learn },
    CommandDescriptor { name: "set", usage: "set <param> <value>", brief: "Set parameter value", handler: cmd_set },
    CommandDescriptor { name: "show", usage: "show [param]", brief: "Show parameters", handler: cmd_show },
    CommandDescriptor { name: "debug", usage: "debug [level]", brief: "Show/set log level", handler: cmd_debug },
    CommandDescriptor { name: "stats", usage: "stats", brief: "Transmission counters", handler: cmd_stats },
    CommandDescriptor { name: "reset", usage: "reset <params|stats>", brief: "Restore defaults / zero counters", handler: cmd_reset },
    CommandDescriptor { name: "status", usage: "status", brief: "Idle or transmitting", handler: cmd_status },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    remote: &dyn RemoteControl,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.is_empty() {
        return Ok(());
    }

    let descriptor = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (descriptor.handler)(cmd, remote, out)
}

/// Parse a 32-bit code written in hex, with or without `0x`.
pub fn parse_code(text: &str) -> Result<u32, ConsoleError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConsoleError::InvalidValue);
    }

    u32::from_str_radix(digits, 16).map_err(|_| ConsoleError::InvalidValue)
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, _remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = COMMANDS
            .iter()
            .find(|c| c.name == name)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", c.usage, c.brief);
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<20} {}", c.usage, c.brief);
        }
    }
    Ok(())
}

fn cmd_list(_cmd: &ParsedCommand<'_>, _remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    for c in Command::ALL {
        let _ = writeln!(out, "  {}  {:<10} 0x{:08X}", c.index(), c.name(), c.code());
    }
    Ok(())
}

fn cmd_send(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let target = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;

    match target.parse::<usize>() {
        Ok(index) => remote.send_command_index(index)?,
        Err(_) => remote.send_command_name(target)?,
    }

    let _ = writeln!(out, "sent {}", target);
    Ok(())
}

fn cmd_raw(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let code = parse_code(cmd.arg(0).ok_or(ConsoleError::MissingArg)?)?;
    remote.send_raw_code(code)?;
    let _ = writeln!(out, "sent 0x{:08X}", code);
    Ok(())
}

fn cmd_learn(_cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let code = remote.learn_code()?;
    let _ = writeln!(out, "learned 0x{:08X}", code);
    Ok(())
}

fn cmd_set(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let name = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let value: u32 = value.parse().map_err(|_| ConsoleError::InvalidValue)?;
    set_param(remote.repeat_config(), name, value)?;

    let _ = writeln!(out, "{}={}", name, value);
    Ok(())
}

fn cmd_show(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let config = remote.repeat_config();

    if let Some(name) = cmd.arg(0) {
        let p = find_param(name).ok_or(ConsoleError::UnknownParam)?;
        let _ = writeln!(out, "{}={}", p.name, (p.get_fn)(config));
    } else {
        for p in PARAMS {
            let _ = writeln!(out, "{}={}  ({}..{}) {}", p.name, (p.get_fn)(config), p.min, p.max, p.brief);
        }
    }
    Ok(())
}

fn cmd_debug(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let log = remote.log_stream();

    if let Some(name) = cmd.arg(0) {
        let level = LogLevel::from_name(name).ok_or(ConsoleError::InvalidValue)?;
        log.set_level(level);
    }

    let _ = writeln!(out, "log level: {}", log.level().as_str());
    Ok(())
}

fn cmd_stats(_cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let s = remote.stats();
    let _ = writeln!(out, "sessions:  {}", s.sessions);
    let _ = writeln!(out, "frames:    {}", s.frames);
    let _ = writeln!(out, "raw:       {}", s.raw_sends);
    let _ = writeln!(out, "rejected:  {}", s.rejected);
    let _ = writeln!(out, "contended: {}", s.contended);
    let _ = writeln!(out, "log drops: {}", remote.log_stream().dropped());
    Ok(())
}

fn cmd_reset(cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let target = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;

    match target {
        "params" => remote.repeat_config().reset(),
        "stats" => remote.reset_stats(),
        _ => return Err(ConsoleError::InvalidValue),
    }

    let _ = writeln!(out, "reset {}", target);
    Ok(())
}

fn cmd_status(_cmd: &ParsedCommand<'_>, remote: &dyn RemoteControl, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let state = match remote.state() {
        TxState::Idle => "idle",
        TxState::Transmitting => "transmitting",
    };
    let _ = writeln!(out, "{}", state);
    Ok(())
}
