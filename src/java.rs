//! Java runtime discovery
//!
//! Looks for a `java` executable on `PATH`, then under `JAVA_HOME`, and on
//! Windows finally picks the newest `jre*` installation below
//! `%ProgramFiles%\Java`.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::platform::Platform;

#[cfg(windows)]
const JAVA_BINARY: &str = "java.exe";
#[cfg(not(windows))]
const JAVA_BINARY: &str = "java";

/// Locate a Java executable, or `None` when nothing usable is installed
pub fn find_java_path() -> Option<PathBuf> {
    let filesystem = Platform::filesystem();

    match filesystem.find_command(JAVA_BINARY) {
        Ok(Some(path)) => return Some(path),
        Ok(None) => {}
        Err(e) => debug!("PATH lookup for {} failed: {}", JAVA_BINARY, e),
    }

    if let Some(home) = std::env::var_os("JAVA_HOME").filter(|v| !v.is_empty()) {
        let candidate = Path::new(&home).join("bin").join(JAVA_BINARY);
        if filesystem.is_executable(&candidate) {
            return Some(candidate);
        }
    }

    #[cfg(windows)]
    if let Some(program_files) = std::env::var_os("ProgramFiles") {
        return newest_jre(&Path::new(&program_files).join("Java"));
    }

    None
}

/// Newest `jre*` directory under `java_root` holding `bin/java`
pub fn newest_jre(java_root: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(java_root).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let version = parse_jre_version(&name)?;
            let binary = entry.path().join("bin").join(JAVA_BINARY);
            binary.is_file().then_some((version, binary))
        })
        .max_by(|(a, _), (b, _)| compare_versions(a, b))
        .map(|(_, binary)| binary)
}

/// Version components of a `jre` directory name
///
/// `jre1.8.0_151` yields `[1, 8, 0, 151]`; a bare `jre7` yields `[7]`.
pub fn parse_jre_version(dir_name: &str) -> Option<Vec<u32>> {
    let rest = dir_name.strip_prefix("jre")?;
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }

    rest.split(['.', '_'])
        .map(|part| part.parse::<u32>().ok())
        .collect()
}

fn compare_versions(a: &[u32], b: &[u32]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
