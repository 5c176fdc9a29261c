use std::path::PathBuf;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Settings {
    pub theme: theme::Theme,
    pub snapshot: SnapshotConfig,
}

/// Where snapshot save/load reads and writes.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SnapshotConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    config_dir: PathBuf,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "Focal", "Focal")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            settings = settings.merge(Toml::file(settings_toml));
        }

        let settings: Settings = settings.extract().map_err(Box::new)?;

        Ok(Self {
            settings,
            config_dir,
        })
    }

    /// The file that snapshot save/load targets when the settings don't
    /// name one.
    pub fn snapshot_path(&self) -> PathBuf {
        self.settings
            .snapshot
            .path
            .clone()
            .unwrap_or_else(|| self.config_dir.join("sessions.json"))
    }
}
