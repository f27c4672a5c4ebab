use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config directory, mainly for tests
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Content file used instead of the built-in portfolio
    pub content: Option<PathBuf>,
    /// Header offset used by `folio track`
    pub header_offset: Option<f64>,
}

impl Config {
    pub const KEYS: &'static str = "content, header-offset";

    /// Get the config directory path (~/.config/folio)
    pub fn dir() -> Option<PathBuf> {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        dirs::home_dir().map(|home| home.join(".config").join("folio"))
    }

    /// Get the config file path (~/.config/folio/config.toml)
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join("config.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A file that no longer parses is moved
    /// aside to `<name>.bak` and defaults are used.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                let backup = backup_path(path);
                fs::rename(path, &backup).with_context(|| {
                    format!("Failed to back up corrupted config: {}", path.display())
                })?;
                tracing::debug!(error = %e, "config parse failed");
                eprintln!(
                    "{} {} is corrupted and was moved to {}; using defaults.",
                    "Warning:".yellow().bold(),
                    file_name(path),
                    backup.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to file, creating directory if needed
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Could not determine config path")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "content" => self.content = Some(PathBuf::from(value)),
            "header-offset" | "header_offset" => {
                let offset: f64 = value
                    .parse()
                    .with_context(|| format!("header-offset must be a number, got: {}", value))?;
                if !offset.is_finite() || offset < 0.0 {
                    anyhow::bail!("header-offset must be zero or more, got: {}", value);
                }
                self.header_offset = Some(offset);
            }
            _ => anyhow::bail!("Unknown config key: {}. Available keys: {}", key, Self::KEYS),
        }
        Ok(())
    }

    /// Display form of a value, `None` when unset
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "content" => Ok(self.content.as_ref().map(|p| p.display().to_string())),
            "header-offset" | "header_offset" => Ok(self.header_offset.map(|o| o.to_string())),
            _ => anyhow::bail!("Unknown config key: {}. Available keys: {}", key, Self::KEYS),
        }
    }

    pub fn clear(&mut self, key: &str) -> Result<()> {
        match key {
            "content" => self.content = None,
            "header-offset" | "header_offset" => self.header_offset = None,
            _ => anyhow::bail!("Unknown config key: {}. Available keys: {}", key, Self::KEYS),
        }
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("content", "/tmp/site.toml").unwrap();
        config.set("header-offset", "80").unwrap();
        config.save_to(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("header-offset = 80.0"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("header-offset").unwrap().as_deref(), Some("80"));
    }

    #[test]
    fn test_corrupted_file_is_backed_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "header-offset = [").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(!path.exists());
        assert!(dir.path().join("config.toml.bak").exists());
    }

    #[test]
    fn test_unknown_and_invalid_keys() {
        let mut config = Config::default();
        assert!(config.set("theme", "dark").is_err());
        assert!(config.get("theme").is_err());
        assert!(config.clear("theme").is_err());
        assert!(config.set("header-offset", "tall").is_err());
        assert!(config.set("header-offset", "-5").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_clear() {
        let mut config = Config::default();
        config.set("content", "site.toml").unwrap();
        config.clear("content").unwrap();
        assert_eq!(config.get("content").unwrap(), None);
    }
}
