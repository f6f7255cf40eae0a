//! Core data models for mcstarter
//!
//! This module contains the data structures shared between the log
//! classifier, the session state machine and the process supervisor.

pub mod parsed_line;
pub mod server_config;
pub mod session;

// Re-exports for convenience
pub use parsed_line::{Dialect, LineEvent, LogLevel, ParsedLine};
pub use server_config::{ProcessPriority, ServerConfiguration, DEFAULT_SERVER_IDENTITIES};
pub use session::{ServerStatus, SessionInput, SessionState, Transition};
