//! Windows-specific platform implementations

mod filesystem;
mod paths;
mod priority;

pub use filesystem::WindowsFilesystem;
pub use paths::WindowsPaths;
pub use priority::WindowsPriority;
