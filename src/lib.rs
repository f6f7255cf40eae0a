//! mcstarter - Supervisor for local Minecraft server processes
//!
//! This library launches a Minecraft server jar under a Java runtime,
//! reads its console output, and turns it into structured events a
//! front-end can render: status changes, classified log messages and
//! player joins/leaves.
//!
//! ## Features
//!
//! - **Multi-dialect log parsing:** vanilla, legacy date-time and spigot-style
//!   prefixes are recognized without configuration
//! - **Session state machine:** `Closed → Opening → Open → Closing → Closed`
//!   driven by the server's own output
//! - **Online player tracking:** join/leave detection anchored to the server's
//!   prefix so chat cannot spoof it
//! - **Command-block echo suppression**
//! - **Configuration:** TOML or JSON files with sensible defaults
//!
//! ## Module Organization
//!
//! - [`classifier`] - Log line classification
//! - [`models`] - Parsed lines, session state, run configuration
//! - [`supervisor`] - Process lifecycle, I/O tasks, event fan-out
//! - [`config`] - Configuration loading and settings access
//! - [`platform`] - OS process priority, executable lookup, config paths
//! - [`java`] - Java runtime discovery
//! - [`eula`] - EULA acceptance file
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcstarter::{init, ProcessSupervisor};
//!
//! # async fn run() -> mcstarter::Result<()> {
//! let config = init()?;
//! let supervisor = ProcessSupervisor::with_event_capacity(config.events.channel_capacity);
//! supervisor
//!     .start(&config.server_configuration("/srv/mc/server.jar"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Reader tasks:** one per output pipe, line by line
//! - **Stdin writer task:** drains a command queue so callers never block
//! - **Exit watcher:** waits for the child or a kill request
//!
//! All session mutations go through one mutex in
//! [`supervisor::SessionDriver`]; events are delivered over a
//! `tokio::sync::broadcast` channel.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod classifier;
pub mod config;
pub mod error;
pub mod eula;
pub mod java;
pub mod models;
pub mod platform;
pub mod supervisor;

// Re-exports for core functionality
pub use classifier::{ClassifyContext, LogLineClassifier};
pub use config::loader::ConfigLoader;
pub use config::{Config, SettingsSource};
pub use error::{Error, Result};
pub use models::{
    LogLevel, ParsedLine, ProcessPriority, ServerConfiguration, ServerStatus, SessionState,
};
pub use supervisor::{
    ProcessSupervisor, ServerCommand, ServerEvent, ServerEventSubscription, ServerMessage,
};

// Version information
/// The current version of mcstarter from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load configuration from the default locations, falling back to defaults
///
/// # Examples
///
/// ```no_run
/// match mcstarter::init() {
///     Ok(config) => println!("Java: {}", config.java.path.display()),
///     Err(e) => eprintln!("{}", mcstarter::handle_startup_error(&e)),
/// }
/// ```
pub fn init() -> Result<Config> {
    info!("🚀 Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            let mut config = Config::default();
            if let Err(e) = config.detect_java() {
                warn!("{}", e);
            }
            config
        }
    };

    Ok(config)
}

/// Load configuration from `config_path`
pub fn init_with_config(config_path: &std::path::Path) -> Result<Config> {
    info!(
        "🚀 Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    ConfigLoader::load_from_path(config_path)
}

/// Turn a startup error into a message with hints for the operator
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::SpawnFailed { command, reason } => {
            format!(
                "Launch Error: could not run '{}': {}\n\nTry:\n• Check the Java path in the configuration\n• Pass --java with the full path to java",
                command, reason
            )
        }
        Error::JavaNotFound => {
            "Launch Error: no Java runtime found\n\nTry:\n• Install Java and add it to PATH\n• Set java.path in the configuration".to_string()
        }
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}",
                path.display(),
                reason
            )
        }
        Error::ConfigParseFailed { format, reason } => {
            format!(
                "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax",
                format, reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}",
                field, reason
            )
        }
        Error::EulaWriteFailed { path, reason } => {
            format!(
                "EULA Error: could not write '{}': {}\n\nTry:\n• Check the server directory exists and is writable",
                path.display(),
                reason
            )
        }
        _ => format!("Unexpected Error: {}", error),
    }
}
