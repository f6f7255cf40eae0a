//! Unix-specific platform implementations

mod filesystem;
mod paths;
mod priority;

pub use filesystem::UnixFilesystem;
pub use paths::UnixPaths;
pub use priority::UnixPriority;
