//! Utility modules for error handling, configuration and filesystem helpers

pub mod config;
pub mod dependencies;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::Settings;
pub use dependencies::{check_dependencies, ExternalTool};
pub use error::DownloaderError;
pub use paths::{expand_home, normalize_output_path};
