//! Post-level Sub-patterns
//!
//! Checks applied to the text right after the level separator. Every
//! pattern is anchored at that exact offset, so chat text that merely
//! contains a system-looking phrase cannot trigger an event.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{LineEvent, ServerStatus};

static READY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Done \(\d").expect("ready pattern is valid"));

static COMMAND_BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(.+?)\]").expect("command block pattern is valid"));

static PLAYER_JOINED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+) ?\[/").expect("join pattern is valid"));

static PLAYER_LEFT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+) lost connection").expect("leave pattern is valid"));

/// Result of the sub-pattern checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep the line, optionally carrying an event
    Accept(Option<LineEvent>),
    /// Drop the line entirely
    Reject,
}

/// Run the sub-pattern checks on `line` starting exactly at `index`
pub fn check(
    line: &str,
    index: usize,
    status: ServerStatus,
    ignore_command_blocks: bool,
    server_identities: &[String],
) -> Outcome {
    // Out of range or inside a multi-byte char: nothing can match here
    let Some(tail) = line.get(index..) else {
        return Outcome::Accept(None);
    };

    if status != ServerStatus::Open {
        if READY_PATTERN.is_match(tail) {
            return Outcome::Accept(Some(LineEvent::Ready));
        }
        return Outcome::Accept(None);
    }

    if ignore_command_blocks && is_command_block_echo(tail, server_identities) {
        return Outcome::Reject;
    }

    if let Some(name) = capture_name(&PLAYER_JOINED_PATTERN, tail) {
        return Outcome::Accept(Some(LineEvent::PlayerJoined(name)));
    }

    if let Some(name) = capture_name(&PLAYER_LEFT_PATTERN, tail) {
        return Outcome::Accept(Some(LineEvent::PlayerLeft(name)));
    }

    Outcome::Accept(None)
}

fn is_command_block_echo(tail: &str, server_identities: &[String]) -> bool {
    match COMMAND_BLOCK_PATTERN.captures(tail).and_then(|c| c.get(1)) {
        Some(name) => !server_identities.iter().any(|id| id == name.as_str()),
        None => false,
    }
}

fn capture_name(pattern: &Regex, tail: &str) -> Option<String> {
    pattern
        .captures(tail)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
