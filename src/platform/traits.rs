//! Platform-specific operation traits
//!
//! These traits define the interface for platform-specific operations,
//! allowing for clean abstraction and easier testing.

use crate::error::Result;
use crate::models::ProcessPriority;
use std::path::PathBuf;

/// Errors raised while changing a process's scheduling priority
#[derive(Debug, thiserror::Error)]
pub enum PriorityError {
    #[error("cannot open process {pid}: {source}")]
    OpenFailed {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot set priority of process {pid}: {source}")]
    SetFailed {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}

impl PriorityError {
    pub fn pid(&self) -> u32 {
        match self {
            PriorityError::OpenFailed { pid, .. } | PriorityError::SetFailed { pid, .. } => *pid,
        }
    }
}

impl From<PriorityError> for crate::error::Error {
    fn from(err: PriorityError) -> Self {
        crate::error::Error::PriorityChangeFailed {
            pid: err.pid(),
            reason: err.to_string(),
        }
    }
}

/// Platform-specific process priority operations
pub trait PriorityOps: Send + Sync {
    /// Apply `priority` to the running process `pid`
    fn set_priority(&self, pid: u32, priority: ProcessPriority) -> std::result::Result<(), PriorityError>;
}

/// Platform-specific filesystem operations
pub trait FilesystemOps: Send + Sync {
    /// Check if a file is executable
    fn is_executable(&self, path: &std::path::Path) -> bool;

    /// Find a command in PATH
    fn find_command(&self, command: &str) -> Result<Option<PathBuf>>;
}

/// Platform-specific path operations
pub trait PathOps: Send + Sync {
    /// Get configuration directory
    fn config_dir(&self) -> Result<PathBuf>;
}
