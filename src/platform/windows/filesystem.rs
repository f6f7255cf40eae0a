//! Windows filesystem operations

use crate::error::Result;
use crate::platform::traits::FilesystemOps;
use std::env;
use std::path::{Path, PathBuf};

const EXECUTABLE_EXTENSIONS: [&str; 4] = ["exe", "bat", "cmd", "com"];

pub struct WindowsFilesystem;

impl WindowsFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl FilesystemOps for WindowsFilesystem {
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| EXECUTABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
    }

    fn find_command(&self, command: &str) -> Result<Option<PathBuf>> {
        let Some(path_env) = env::var_os("PATH") else {
            return Ok(None);
        };

        let has_extension = Path::new(command).extension().is_some();
        for dir in env::split_paths(&path_env) {
            if has_extension {
                let full_path = dir.join(command);
                if self.is_executable(&full_path) {
                    return Ok(Some(full_path));
                }
                continue;
            }
            for ext in EXECUTABLE_EXTENSIONS {
                let full_path = dir.join(format!("{}.{}", command, ext));
                if self.is_executable(&full_path) {
                    return Ok(Some(full_path));
                }
            }
        }

        Ok(None)
    }
}
