//! Configuration management for mcstarter
//!
//! Application settings (Java location, heap sizes, priority, classifier
//! options) loaded from TOML or JSON files, plus the [`SettingsSource`]
//! interface the core uses to read individual settings.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::{ProcessPriority, ServerConfiguration, DEFAULT_SERVER_IDENTITIES};

/// Setting keys understood by [`SettingsSource`] implementations
pub mod keys {
    pub const MIN_RAM: &str = "minRam";
    pub const MAX_RAM: &str = "maxRam";
    pub const JAVA_PATH: &str = "javaPath";
    pub const PRIORITY: &str = "priority";
    pub const IGNORE_COMMAND_BLOCKS: &str = "ignoreCommandsBlock";
}

/// Read access to individual settings by key
pub trait SettingsSource: Send + Sync {
    fn read_int(&self, key: &str) -> Option<i64>;
    fn read_string(&self, key: &str) -> Option<String>;
    fn read_bool(&self, key: &str) -> Option<bool>;
}

/// Main configuration structure for mcstarter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Java runtime configuration
    pub java: JavaConfig,

    /// Server supervision configuration
    pub server: ServerSettings,

    /// Event delivery configuration
    pub events: EventConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Java runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    /// Java executable; detected on first load when empty
    pub path: PathBuf,

    /// Initial heap size in megabytes
    pub min_ram_mb: u32,

    /// Maximum heap size in megabytes
    pub max_ram_mb: u32,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            min_ram_mb: 512,
            max_ram_mb: 1024,
        }
    }
}

/// Server supervision configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Priority applied once the server is ready
    pub priority: ProcessPriority,

    /// Suppress command-block echoes while the server is open
    pub ignore_command_blocks: bool,

    /// Bracketed names never treated as command-block echoes
    pub server_identities: Vec<String>,

    /// Write `eula.txt` accepting the EULA before starting
    pub accept_eula: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            priority: ProcessPriority::Normal,
            ignore_command_blocks: true,
            server_identities: DEFAULT_SERVER_IDENTITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            accept_eula: true,
        }
    }
}

/// Event delivery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Events buffered per subscriber before it starts lagging
    pub channel_capacity: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Build the run configuration for one server jar
    pub fn server_configuration(&self, jar_path: impl Into<PathBuf>) -> ServerConfiguration {
        let mut config = ServerConfiguration::new(self.java.path.clone(), jar_path)
            .with_ram(self.java.min_ram_mb, self.java.max_ram_mb);
        config.priority = self.server.priority;
        config.ignore_command_blocks = self.server.ignore_command_blocks;
        config.server_identities = self.server.server_identities.clone();
        config.accept_eula = self.server.accept_eula;
        config
    }

    /// Fill in the Java path from the system when none is configured
    pub fn detect_java(&mut self) -> Result<()> {
        if !self.java.path.as_os_str().is_empty() {
            return Ok(());
        }
        let path = crate::java::find_java_path().ok_or(Error::JavaNotFound)?;
        info!("Detected Java at {}", path.display());
        self.java.path = path;
        Ok(())
    }
}

impl SettingsSource for Config {
    fn read_int(&self, key: &str) -> Option<i64> {
        match key {
            keys::MIN_RAM => Some(i64::from(self.java.min_ram_mb)),
            keys::MAX_RAM => Some(i64::from(self.java.max_ram_mb)),
            keys::PRIORITY => Some(i64::from(crate::platform::priority_class(
                self.server.priority,
            ))),
            _ => None,
        }
    }

    fn read_string(&self, key: &str) -> Option<String> {
        match key {
            keys::JAVA_PATH if !self.java.path.as_os_str().is_empty() => {
                Some(self.java.path.to_string_lossy().to_string())
            }
            _ => None,
        }
    }

    fn read_bool(&self, key: &str) -> Option<bool> {
        match key {
            keys::IGNORE_COMMAND_BLOCKS => Some(self.server.ignore_command_blocks),
            _ => None,
        }
    }
}
