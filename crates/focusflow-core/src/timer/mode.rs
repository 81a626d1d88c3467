use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of completed focus sessions between long breaks.
pub const LONG_BREAK_INTERVAL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn is_break(self) -> bool {
        !matches!(self, TimerMode::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Break that follows a focus session, given the session count used for
    /// the long-break decision.
    pub fn break_after(session_count: u32) -> TimerMode {
        if session_count % LONG_BREAK_INTERVAL == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "short-break",
            TimerMode::LongBreak => "long-break",
        };
        f.write_str(s)
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(TimerMode::Focus),
            "short-break" | "shortbreak" | "short_break" | "short" => Ok(TimerMode::ShortBreak),
            "long-break" | "longbreak" | "long_break" | "long" => Ok(TimerMode::LongBreak),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fourth_session_earns_a_long_break() {
        assert_eq!(TimerMode::break_after(1), TimerMode::ShortBreak);
        assert_eq!(TimerMode::break_after(3), TimerMode::ShortBreak);
        assert_eq!(TimerMode::break_after(4), TimerMode::LongBreak);
        assert_eq!(TimerMode::break_after(8), TimerMode::LongBreak);
        assert_eq!(TimerMode::break_after(0), TimerMode::LongBreak);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("focus".parse::<TimerMode>().unwrap(), TimerMode::Focus);
        assert_eq!("short-break".parse::<TimerMode>().unwrap(), TimerMode::ShortBreak);
        assert_eq!("LongBreak".parse::<TimerMode>().unwrap(), TimerMode::LongBreak);
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn serializes_as_camel_case() {
        let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
        let back: TimerMode = serde_json::from_str("\"longBreak\"").unwrap();
        assert_eq!(back, TimerMode::LongBreak);
    }
}
