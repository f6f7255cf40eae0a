//! Log Line Classification
//!
//! Turns one raw line of server output into a [`ParsedLine`]. Three
//! families of prefixes are recognized without prior configuration:
//!
//! - `[HH:MM:SS] [LEVEL]: message` (vanilla)
//! - `YYYY-MM-DD HH:MM:SS [LEVEL] message` (legacy vanilla)
//! - `[HH:MM:SS LEVEL]: message` (spigot)
//!
//! Anything else is passed through verbatim. Classification never fails;
//! ambiguous input degrades to "no level, literal message, no event".
//!
//! The classifier itself is stateless apart from its compiled patterns;
//! the session-dependent bits (current status, command-block suppression)
//! arrive through [`ClassifyContext`].

pub mod dialect;
pub mod patterns;

use crate::models::{
    Dialect, LogLevel, ParsedLine, ServerStatus, DEFAULT_SERVER_IDENTITIES,
};
use patterns::Outcome;

/// Session facts the sub-pattern checks depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyContext {
    pub status: ServerStatus,
    pub ignore_command_blocks: bool,
}

impl ClassifyContext {
    pub fn new(status: ServerStatus, ignore_command_blocks: bool) -> Self {
        Self {
            status,
            ignore_command_blocks,
        }
    }
}

/// Multi-dialect classifier for server log lines
#[derive(Debug, Clone)]
pub struct LogLineClassifier {
    server_identities: Vec<String>,
}

impl LogLineClassifier {
    /// Create a classifier with the default server identities
    pub fn new() -> Self {
        Self::with_server_identities(DEFAULT_SERVER_IDENTITIES.iter().copied())
    }

    /// Create a classifier treating `identities` as the server's own name
    pub fn with_server_identities<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            server_identities: identities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn server_identities(&self) -> &[String] {
        &self.server_identities
    }

    /// Classify one line (without its trailing newline)
    pub fn classify(&self, line: &str, ctx: &ClassifyContext) -> ParsedLine {
        if let Some(timestamp) = dialect::match_timestamp(line) {
            let timestamp_text = &line[..timestamp.end];

            let Some(level) = dialect::match_level(line, timestamp.end) else {
                return ParsedLine {
                    timestamp_text: timestamp_text.to_string(),
                    message: line[timestamp.end..].trim().to_string(),
                    dialect: timestamp.dialect,
                    ..ParsedLine::default()
                };
            };

            let rest = line[level.end..].trim();
            // Legacy versions print the message one space after the level,
            // without ": ", so the sub-pattern index only advances by one.
            let (message, separator_len) = match rest.strip_prefix(": ") {
                Some(message) => (message, 2),
                None => (rest, 1),
            };

            let parsed = ParsedLine {
                timestamp_text: timestamp_text.to_string(),
                level: LogLevel::from_token(level.name),
                level_name_raw: level.name.to_string(),
                message: message.to_string(),
                dialect: timestamp.dialect,
                ..ParsedLine::default()
            };
            return self.apply_checks(parsed, line, level.end + separator_len, ctx);
        }

        if let Some(spigot) = dialect::match_spigot(line) {
            let parsed = ParsedLine {
                timestamp_text: format!("[{}]", spigot.time),
                level: LogLevel::from_token(spigot.level),
                level_name_raw: spigot.level.to_string(),
                message: line[spigot.end..].to_string(),
                dialect: Dialect::Spigot,
                ..ParsedLine::default()
            };
            return self.apply_checks(parsed, line, spigot.end, ctx);
        }

        ParsedLine::passthrough(line)
    }

    fn apply_checks(
        &self,
        mut parsed: ParsedLine,
        line: &str,
        index: usize,
        ctx: &ClassifyContext,
    ) -> ParsedLine {
        match patterns::check(
            line,
            index,
            ctx.status,
            ctx.ignore_command_blocks,
            &self.server_identities,
        ) {
            Outcome::Accept(event) => {
                parsed.event = event;
                parsed
            }
            Outcome::Reject => parsed.rejected(),
        }
    }
}

impl Default for LogLineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
