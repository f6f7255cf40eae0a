//! Server Run Configuration
//!
//! The immutable inputs of one server run: which Java to use, which jar
//! to launch, heap sizes, scheduling priority and classifier options.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{keys, SettingsSource};
use crate::error::{Error, Result};

/// Default server identity tokens that are never treated as command-block echoes
pub const DEFAULT_SERVER_IDENTITIES: &[&str] = &["Server", "@"];

/// OS scheduling priority requested for the server once it is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessPriority {
    High,
    AboveNormal,
    #[default]
    Normal,
    BelowNormal,
    Idle,
}

impl ProcessPriority {
    /// All priorities in settings-index order
    pub const ALL: [ProcessPriority; 5] = [
        ProcessPriority::High,
        ProcessPriority::AboveNormal,
        ProcessPriority::Normal,
        ProcessPriority::BelowNormal,
        ProcessPriority::Idle,
    ];

    /// Map a settings index (0 = high .. 4 = idle); out of range is `Normal`
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }
}

/// Everything needed to launch one server process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfiguration {
    /// Java executable
    pub java_path: PathBuf,

    /// Server jar to launch
    pub jar_path: PathBuf,

    /// Working directory; the jar's directory when `None`
    pub working_directory: Option<PathBuf>,

    /// Initial heap size in megabytes
    pub min_ram_mb: u32,

    /// Maximum heap size in megabytes
    pub max_ram_mb: u32,

    /// Priority applied once the server reports it is ready
    pub priority: ProcessPriority,

    /// Suppress command-block echoes while the server is open
    pub ignore_command_blocks: bool,

    /// Bracketed names that are never treated as command-block echoes
    pub server_identities: Vec<String>,

    /// Write `eula.txt` accepting the EULA before starting
    pub accept_eula: bool,
}

impl ServerConfiguration {
    /// Create a configuration with default heap sizes and options
    pub fn new(java_path: impl Into<PathBuf>, jar_path: impl Into<PathBuf>) -> Self {
        Self {
            java_path: java_path.into(),
            jar_path: jar_path.into(),
            working_directory: None,
            min_ram_mb: 512,
            max_ram_mb: 1024,
            priority: ProcessPriority::Normal,
            ignore_command_blocks: true,
            server_identities: DEFAULT_SERVER_IDENTITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            accept_eula: true,
        }
    }

    /// Build a run configuration for `jar_path` from a settings source
    pub fn from_settings(settings: &dyn SettingsSource, jar_path: impl Into<PathBuf>) -> Result<Self> {
        let java_path = settings
            .read_string(keys::JAVA_PATH)
            .ok_or_else(|| Error::SettingMissing {
                key: keys::JAVA_PATH.to_string(),
            })?;

        let mut config = Self::new(java_path, jar_path);

        if let Some(min) = settings.read_int(keys::MIN_RAM) {
            config.min_ram_mb = ram_setting(keys::MIN_RAM, min)?;
        }
        if let Some(max) = settings.read_int(keys::MAX_RAM) {
            config.max_ram_mb = ram_setting(keys::MAX_RAM, max)?;
        }
        if let Some(class) = settings.read_int(keys::PRIORITY) {
            config.priority = u32::try_from(class)
                .ok()
                .and_then(crate::platform::priority_from_class)
                .unwrap_or_default();
        }
        if let Some(ignore) = settings.read_bool(keys::IGNORE_COMMAND_BLOCKS) {
            config.ignore_command_blocks = ignore;
        }

        Ok(config)
    }

    /// Builder: set heap sizes
    pub fn with_ram(mut self, min_ram_mb: u32, max_ram_mb: u32) -> Self {
        self.min_ram_mb = min_ram_mb;
        self.max_ram_mb = max_ram_mb;
        self
    }

    /// Builder: set the working directory
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    /// The jar path resolved against the current directory.
    ///
    /// The server runs inside the jar's directory, so a relative path
    /// handed to `-jar` would resolve a second time from there.
    pub fn resolved_jar_path(&self) -> PathBuf {
        if self.jar_path.is_absolute() {
            return self.jar_path.clone();
        }
        std::path::absolute(&self.jar_path).unwrap_or_else(|_| self.jar_path.clone())
    }

    /// Directory the process is started in
    pub fn effective_working_directory(&self) -> PathBuf {
        if let Some(dir) = &self.working_directory {
            return dir.clone();
        }
        self.resolved_jar_path()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// JVM arguments, one per element
    pub fn java_args(&self) -> Vec<String> {
        vec![
            format!("-Xms{}M", self.min_ram_mb),
            format!("-Xmx{}M", self.max_ram_mb),
            "-jar".to_string(),
            self.resolved_jar_path().to_string_lossy().to_string(),
            "nogui".to_string(),
        ]
    }

    /// The argument string exactly as it is passed on the command line
    pub fn command_line(&self) -> String {
        format!(
            "-Xms{}M -Xmx{}M -jar \"{}\" nogui",
            self.min_ram_mb,
            self.max_ram_mb,
            self.resolved_jar_path().display()
        )
    }

    /// Validate the configuration before spawning
    pub fn validate(&self) -> Result<()> {
        if self.java_path.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "java_path".to_string(),
                reason: "Java path cannot be empty".to_string(),
            });
        }

        if self.jar_path.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "jar_path".to_string(),
                reason: "Server jar path cannot be empty".to_string(),
            });
        }

        if self.min_ram_mb == 0 || self.max_ram_mb == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "ram".to_string(),
                reason: "Heap sizes must be positive".to_string(),
            });
        }

        if self.min_ram_mb > self.max_ram_mb {
            return Err(Error::ConfigValidationFailed {
                field: "ram".to_string(),
                reason: format!(
                    "Minimum heap ({}M) exceeds maximum heap ({}M)",
                    self.min_ram_mb, self.max_ram_mb
                ),
            });
        }

        Ok(())
    }
}

fn ram_setting(key: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| Error::ConfigValidationFailed {
            field: key.to_string(),
            reason: format!("{} is not a positive megabyte count", value),
        })
}
