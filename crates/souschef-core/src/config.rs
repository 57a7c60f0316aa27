use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// UI color scheme. The only piece of state that survives a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub theme: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self { theme: None }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// Persist a theme toggle without touching the rest of the config.
    pub fn save_theme(theme: Theme) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.theme = Some(theme.as_str().to_string());
        config.save()
    }

    /// The effective theme: the stored flag, or dark when absent or
    /// unrecognized (the terminal has no OS color-scheme preference to
    /// fall back on).
    pub fn resolved_theme(&self) -> Theme {
        self.theme
            .as_deref()
            .and_then(Theme::from_str)
            .unwrap_or_default()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("sous-chef").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.resolved_theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sous-chef").join("config.json");

        let mut config = Config::new();
        config.theme = Some(Theme::Light.as_str().to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.resolved_theme(), Theme::Light);
    }

    #[test]
    fn test_unrecognized_theme_falls_back_to_dark() {
        let config = Config {
            theme: Some("solarized".to_string()),
        };
        assert_eq!(config.resolved_theme(), Theme::Dark);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
