//! Command line parser
//!
//! Split on whitespace, command plus at most 3 arguments.

/// Maximum number of arguments kept.
pub const MAX_ARGS: usize = 3;

/// Parsed command line
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// First token, empty for a blank line
    pub command: &'a str,
    /// Following tokens; extras are dropped
    pub args: [Option<&'a str>; MAX_ARGS],
}

impl<'a> ParsedCommand<'a> {
    /// Argument by 0-based index
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a command line
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    for (slot, arg) in args.iter_mut().zip(parts) {
        *slot = Some(arg);
    }

    ParsedCommand { command, args }
}
