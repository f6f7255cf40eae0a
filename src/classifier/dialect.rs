//! Log Dialect Matchers
//!
//! Prefix forms emitted by the server variants we supervise. Each form is
//! kept as data (a dialect tag plus an anchored pattern) and each matcher
//! reports the byte offset where its match ends, which feeds the next stage.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Dialect;

/// An anchored timestamp form
pub struct TimestampForm {
    pub dialect: Dialect,
    pattern: Regex,
}

impl TimestampForm {
    fn new(dialect: Dialect, pattern: &str) -> Self {
        Self {
            dialect,
            pattern: Regex::new(pattern).expect("timestamp pattern is valid"),
        }
    }

    /// End offset of the timestamp if the line starts with this form
    pub fn match_end(&self, line: &str) -> Option<usize> {
        self.pattern.find(line).map(|m| m.end())
    }
}

/// Timestamp forms in the order they are tried; first match wins
pub static TIMESTAMP_FORMS: Lazy<Vec<TimestampForm>> = Lazy::new(|| {
    vec![
        TimestampForm::new(Dialect::Bracketed, r"^\[\d{2}:\d{2}:\d{2}\]"),
        TimestampForm::new(Dialect::DateTime, r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}"),
    ]
});

// [INFO], [Server thread/WARN], [Server Shutdown Thread/INFO], ...
static LEVEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?:Server(?: Shutdown)? [tT]hread/)?(INFO|WARN|WARNING|ERROR)\]")
        .expect("level pattern is valid")
});

// [HH:MM:SS LEVEL]:
static SPIGOT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d{2}:\d{2}:\d{2}) (INFO|WARN|ERROR)\]: ").expect("spigot pattern is valid")
});

/// A matched timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampMatch {
    pub dialect: Dialect,
    pub end: usize,
}

/// A matched level token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMatch<'a> {
    pub name: &'a str,
    pub end: usize,
}

/// A matched combined time and level group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpigotMatch<'a> {
    pub time: &'a str,
    pub level: &'a str,
    pub end: usize,
}

/// Match a timestamp at column 0
pub fn match_timestamp(line: &str) -> Option<TimestampMatch> {
    TIMESTAMP_FORMS.iter().find_map(|form| {
        form.match_end(line).map(|end| TimestampMatch {
            dialect: form.dialect,
            end,
        })
    })
}

/// Match a level token one space after `timestamp_end`
pub fn match_level(line: &str, timestamp_end: usize) -> Option<LevelMatch<'_>> {
    let after = line.get(timestamp_end..)?.strip_prefix(' ')?;
    let start = timestamp_end + 1;
    let caps = LEVEL_PATTERN.captures(after)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?;

    Some(LevelMatch {
        name: name.as_str(),
        end: start + whole.end(),
    })
}

/// Match the combined spigot prefix at column 0
pub fn match_spigot(line: &str) -> Option<SpigotMatch<'_>> {
    let caps = SPIGOT_PATTERN.captures(line)?;
    Some(SpigotMatch {
        time: caps.get(1)?.as_str(),
        level: caps.get(2)?.as_str(),
        end: caps.get(0)?.end(),
    })
}
