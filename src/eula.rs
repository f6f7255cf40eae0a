//! Minecraft EULA acceptance
//!
//! The server refuses to finish starting until `eula.txt` in its working
//! directory contains `eula=true`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Error, Result};

pub const EULA_FILE: &str = "eula.txt";
const EULA_URL: &str = "https://account.mojang.com/documents/Minecraft_eula";

/// Path of the EULA file inside `dir`
pub fn eula_path(dir: &Path) -> PathBuf {
    dir.join(EULA_FILE)
}

/// Whether `dir` already holds an accepted EULA
pub fn is_accepted(dir: &Path) -> bool {
    match fs::read_to_string(eula_path(dir)) {
        Ok(content) => !content.contains("eula=false"),
        Err(_) => false,
    }
}

/// Write an accepted `eula.txt` into `dir` unless one is already there
///
/// Returns `true` when the file was written.
pub fn ensure_eula_accepted(dir: &Path) -> Result<bool> {
    if is_accepted(dir) {
        return Ok(false);
    }

    let path = eula_path(dir);
    let content = format!(
        "#By changing the setting below to TRUE you are indicating your agreement to our EULA ({}).\n#{}\neula=true\n",
        EULA_URL,
        Local::now().format("%a %b %d %H:%M:%S %Z %Y"),
    );

    fs::write(&path, content).map_err(|e| Error::EulaWriteFailed {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    info!("Accepted the Minecraft EULA in {}", path.display());
    Ok(true)
}
