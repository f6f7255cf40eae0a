//! Error types and Result aliases for mcstarter

use std::fmt;
use std::path::PathBuf;

/// Result type alias for mcstarter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mcstarter
#[derive(Debug)]
pub enum Error {
    // === Process errors ===
    /// Failed to spawn the server process (missing executable, permissions, bad arguments)
    SpawnFailed {
        command: String,
        reason: String,
    },

    /// A child pipe was not available after spawning
    StreamUnavailable {
        stream: String,
    },

    /// Failed to write a command to the server's stdin
    CommandWriteFailed {
        command: String,
        reason: String,
    },

    /// Failed to change the scheduling priority of the server process
    PriorityChangeFailed {
        pid: u32,
        reason: String,
    },

    /// Failed to write the EULA acceptance file
    EulaWriteFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to serialize configuration
    ConfigSerializationFailed {
        format: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// A required setting is missing from a settings source
    SettingMissing {
        key: String,
    },

    /// Java executable could not be located
    JavaNotFound,

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Process errors
            Error::SpawnFailed { command, reason } => {
                write!(f, "Failed to spawn server '{}': {}", command, reason)
            }
            Error::StreamUnavailable { stream } => {
                write!(f, "Server {} pipe is not available", stream)
            }
            Error::CommandWriteFailed { command, reason } => {
                write!(f, "Failed to send command '{}': {}", command, reason)
            }
            Error::PriorityChangeFailed { pid, reason } => {
                write!(f, "Failed to change priority of process {}: {}", pid, reason)
            }
            Error::EulaWriteFailed { path, reason } => {
                write!(f, "Failed to write EULA file '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigSerializationFailed { format, reason } => {
                write!(f, "Failed to serialize config as {}: {}", format, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::SettingMissing { key } => {
                write!(f, "Setting '{}' is missing", key)
            }
            Error::JavaNotFound => {
                write!(f, "Could not locate a Java executable")
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            Error::Regex(err) => Some(err),
            _ => None,
        }
    }
}

impl Error {
    /// Whether this error was raised while trying to launch the server process
    pub fn is_spawn_failure(&self) -> bool {
        matches!(
            self,
            Error::SpawnFailed { .. } | Error::StreamUnavailable { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
