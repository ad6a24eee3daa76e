use color_eyre::eyre::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "scala40";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the game documents are kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Preferred output format ("json" or "human")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl CliConfig {
    /// Get the config directory path (~/.config/scala40 on Linux)
    pub fn config_dir() -> color_eyre::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find config directory"))?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> color_eyre::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location
    pub fn load() -> color_eyre::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, defaults if it doesn't exist
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> color_eyre::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).wrap_err_with(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).wrap_err("Failed to serialize config")?;

        std::fs::write(path, contents)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Directory holding the game documents: the configured one, else the
    /// platform data directory
    pub fn data_dir(&self) -> color_eyre::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find data directory"))?
            .join(APP_DIR);
        Ok(data_dir)
    }
}
