//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use mindtree::{MindtreeError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for MindtreeError {
    fn from(err: ConfigError) -> Self {
        MindtreeError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (mindtree/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, MindtreeError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("mindtree/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "mindtree", "mindtree") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file is missing, unreadable, or not valid TOML for
/// [`AppConfig`].
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, MindtreeError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, MindtreeError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use mindtree::orientation::Orientation;

    use super::*;

    #[test]
    fn test_parse_sections() {
        let config = parse_config(
            r##"
            [layout]
            orientation = "top-to-bottom"
            level_spacing = 100.0

            [sizing.anchors]
            answer = 30.0

            [style]
            background_color = "#fafafa"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().orientation(), Orientation::TopToBottom);
        assert_eq!(config.layout().level_spacing(), 100.0);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.layout().level_spacing(), 150.0);
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[layout\n").unwrap_err();
        assert!(matches!(err, MindtreeError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
