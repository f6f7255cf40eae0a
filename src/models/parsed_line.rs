//! Parsed Line Model
//!
//! Represents a single line of server output after classification.
//! A line is either fully parsed (time, level and message split apart)
//! or passed through verbatim with empty time and level.

use serde::{Deserialize, Serialize};

/// Severity of a classified log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    /// No level token was recognized
    #[default]
    Unknown,
}

impl LogLevel {
    /// Map a raw level token (`INFO`, `WARN`, `WARNING`, `ERROR`) to a level
    pub fn from_token(token: &str) -> Self {
        match token {
            "INFO" => LogLevel::Info,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Unknown => "unknown",
        }
    }
}

/// The prefix form a line was recognized under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `[HH:MM:SS] [LEVEL]: message`
    Bracketed,
    /// `YYYY-MM-DD HH:MM:SS [LEVEL] message`
    DateTime,
    /// `[HH:MM:SS LEVEL]: message`
    Spigot,
    /// Unrecognized prefix, passed through verbatim
    #[default]
    Plain,
}

/// Structured event extracted from a line by the post-level checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEvent {
    /// The server finished loading (`Done (...`)
    Ready,
    /// A player connected
    PlayerJoined(String),
    /// A player disconnected
    PlayerLeft(String),
}

/// A classified line of server output
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Verbatim time token, empty if absent
    pub timestamp_text: String,

    /// Parsed severity
    pub level: LogLevel,

    /// Original level token text, empty if absent
    pub level_name_raw: String,

    /// Remainder of the line after the prefix
    pub message: String,

    /// The line must be suppressed entirely
    pub rejected: bool,

    /// Which prefix form matched
    pub dialect: Dialect,

    /// Event signalled by this line, if any
    pub event: Option<LineEvent>,
}

impl ParsedLine {
    /// A line with no recognized prefix; the whole text becomes the message
    pub fn passthrough(line: &str) -> Self {
        Self {
            message: line.to_string(),
            ..Self::default()
        }
    }

    /// A line suppressed by the classifier
    pub fn rejected(mut self) -> Self {
        self.rejected = true;
        self.event = None;
        self
    }

    /// Check whether a level token was recognized
    pub fn has_level(&self) -> bool {
        !self.level_name_raw.is_empty()
    }

    /// Check whether a timestamp was recognized
    pub fn has_timestamp(&self) -> bool {
        !self.timestamp_text.is_empty()
    }
}
