//! Path management for drafter configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/drafter/           # Config directory
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "drafter";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct DrafterPaths;

impl DrafterPaths {
    /// Returns the drafter configuration directory (e.g. `~/.config/drafter/`).
    ///
    /// Uses the platform config directory and falls back to `~/.config` when
    /// the platform does not report one.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_inside_config_dir() {
        if let (Ok(dir), Ok(file)) = (DrafterPaths::config_dir(), DrafterPaths::config_file()) {
            assert!(dir.ends_with(APP_DIR_NAME));
            assert_eq!(file.parent(), Some(dir.as_path()));
            assert_eq!(file.file_name().unwrap(), "config.toml");
        }
    }
}
