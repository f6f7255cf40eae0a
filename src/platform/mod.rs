//! Platform abstraction layer
//!
//! This module provides a unified interface for platform-specific operations,
//! abstracting away differences between Unix and Windows.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use traits::*;

use crate::models::ProcessPriority;

/// Windows priority class values, also used as the persisted `priority` setting
const PRIORITY_CLASSES: [(ProcessPriority, u32); 5] = [
    (ProcessPriority::High, 0x0000_0080),
    (ProcessPriority::AboveNormal, 0x0000_8000),
    (ProcessPriority::Normal, 0x0000_0020),
    (ProcessPriority::BelowNormal, 0x0000_4000),
    (ProcessPriority::Idle, 0x0000_0040),
];

/// Map a priority to its OS priority-class value
pub fn priority_class(priority: ProcessPriority) -> u32 {
    PRIORITY_CLASSES
        .iter()
        .find(|(p, _)| *p == priority)
        .map(|(_, class)| *class)
        .unwrap_or(0x0000_0020)
}

/// Map an OS priority-class value back to a priority
pub fn priority_from_class(class: u32) -> Option<ProcessPriority> {
    PRIORITY_CLASSES
        .iter()
        .find(|(_, c)| *c == class)
        .map(|(p, _)| *p)
}

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific priority operations
    pub fn priority() -> Box<dyn PriorityOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPriority::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPriority::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific filesystem operations
    pub fn filesystem() -> Box<dyn FilesystemOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixFilesystem::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsFilesystem::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPaths::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPaths::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}
