//! Commands sent from the front panel to the sensor board

use core::fmt::Write;

use heapless::String;

/// Longest encoded command ("set_minute 59\n")
pub const MAX_COMMAND_LEN: usize = 16;

const SET_HOUR: &str = "set_hour";
const SET_MINUTE: &str = "set_minute";

/// Errors that can occur while encoding or parsing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Hour above 23 or minute above 59
    OutOfRange,
    /// Keyword is not a known command
    UnknownCommand,
    /// Argument missing or not an integer
    InvalidArgument,
    /// Encoded command does not fit the buffer
    BufferTooSmall,
}

/// A confirmed alarm field to report to the sensor board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceCommand {
    /// Alarm hour confirmed (0-23)
    SetHour(u8),
    /// Alarm minute confirmed (0-59)
    SetMinute(u8),
}

impl DeviceCommand {
    /// Command keyword on the wire
    pub fn keyword(&self) -> &'static str {
        match self {
            DeviceCommand::SetHour(_) => SET_HOUR,
            DeviceCommand::SetMinute(_) => SET_MINUTE,
        }
    }

    /// Command argument
    pub fn value(&self) -> u8 {
        match self {
            DeviceCommand::SetHour(v) | DeviceCommand::SetMinute(v) => *v,
        }
    }

    fn check_range(&self) -> Result<(), CommandError> {
        let in_range = match self {
            DeviceCommand::SetHour(h) => *h <= 23,
            DeviceCommand::SetMinute(m) => *m <= 59,
        };
        if in_range {
            Ok(())
        } else {
            Err(CommandError::OutOfRange)
        }
    }

    /// Encode as a newline-terminated text line
    pub fn encode(&self) -> Result<String<MAX_COMMAND_LEN>, CommandError> {
        self.check_range()?;
        let mut out = String::new();
        writeln!(out, "{} {}", self.keyword(), self.value())
            .map_err(|_| CommandError::BufferTooSmall)?;
        Ok(out)
    }

    /// Parse a command line (sensor board side, or for simulation)
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next().ok_or(CommandError::UnknownCommand)?;
        let value = parts
            .next()
            .and_then(|v| v.parse::<u8>().ok())
            .ok_or(CommandError::InvalidArgument)?;
        if parts.next().is_some() {
            return Err(CommandError::InvalidArgument);
        }

        let cmd = match keyword {
            SET_HOUR => DeviceCommand::SetHour(value),
            SET_MINUTE => DeviceCommand::SetMinute(value),
            _ => return Err(CommandError::UnknownCommand),
        };
        cmd.check_range()?;
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_set_hour() {
        let line = DeviceCommand::SetHour(7).encode().unwrap();
        assert_eq!(line.as_str(), "set_hour 7\n");
    }

    #[test]
    fn test_encode_longest_command_fits() {
        let line = DeviceCommand::SetMinute(59).encode().unwrap();
        assert_eq!(line.as_str(), "set_minute 59\n");
    }

    #[test]
    fn test_encode_out_of_range() {
        assert_eq!(
            DeviceCommand::SetHour(24).encode(),
            Err(CommandError::OutOfRange)
        );
        assert_eq!(
            DeviceCommand::SetMinute(60).encode(),
            Err(CommandError::OutOfRange)
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            DeviceCommand::parse("set_hour 23\n"),
            Ok(DeviceCommand::SetHour(23))
        );
        assert_eq!(
            DeviceCommand::parse("  set_minute 0"),
            Ok(DeviceCommand::SetMinute(0))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            DeviceCommand::parse("set_alarm 1"),
            Err(CommandError::UnknownCommand)
        );
        assert_eq!(
            DeviceCommand::parse("set_hour"),
            Err(CommandError::InvalidArgument)
        );
        assert_eq!(
            DeviceCommand::parse("set_hour 1 2"),
            Err(CommandError::InvalidArgument)
        );
        assert_eq!(
            DeviceCommand::parse("set_minute 75"),
            Err(CommandError::OutOfRange)
        );
        assert_eq!(DeviceCommand::parse(""), Err(CommandError::UnknownCommand));
    }

    #[test]
    fn test_encoded_command_parses_back() {
        let cmd = DeviceCommand::SetMinute(42);
        let line = cmd.encode().unwrap();
        assert_eq!(DeviceCommand::parse(&line), Ok(cmd));
    }
}
