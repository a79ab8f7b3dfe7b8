use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Args;
use crate::error::TrackerError;

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    pub catalogue_path: String,
    pub state_dir: String,
    pub state_file: String,
}

#[derive(Debug, Deserialize)]
pub struct UiConfig {
    pub title: String,
    /// Rows shown before the terminal reports its size.
    pub page_size: u16,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config → CLI flags.
    pub fn load(args: &Args) -> Result<Self, TrackerError> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "nk-apps") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                config = Self::from_file(&config_path)?;
            }
        }

        config.apply_args(args);
        config.expand_home()?;
        Ok(config)
    }

    pub fn defaults() -> Result<Self, TrackerError> {
        toml::from_str(DEFAULTS).map_err(|source| TrackerError::Config {
            path: PathBuf::from("config/default.toml"),
            source,
        })
    }

    fn from_file(path: &Path) -> Result<Self, TrackerError> {
        let raw = fs::read_to_string(path).map_err(|source| TrackerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| TrackerError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.catalogue {
            self.general.catalogue_path = path.to_string_lossy().into_owned();
        }
        if let Some(dir) = &args.state_dir {
            self.general.state_dir = dir.to_string_lossy().into_owned();
        }
    }

    fn expand_home(&mut self) -> Result<(), TrackerError> {
        for value in [&mut self.general.catalogue_path, &mut self.general.state_dir] {
            if value.starts_with('~') {
                let home = dirs_home().ok_or(TrackerError::HomeDir)?;
                *value = expand_tilde(value, &home);
            }
        }
        Ok(())
    }

    pub fn catalogue_path(&self) -> PathBuf {
        PathBuf::from(&self.general.catalogue_path)
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.state_dir)
    }
}

fn expand_tilde(value: &str, home: &Path) -> String {
    value.replacen('~', &home.to_string_lossy(), 1)
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
