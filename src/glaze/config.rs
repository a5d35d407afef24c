use crate::error::{GlazeError, Result};
use crate::gallery::{SortKey, DEFAULT_STAGGER_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CATALOG_DIR: &str = "content/pieces";

pub const CONFIG_KEYS: &[&str] = &["catalog-dir", "default-sort", "stagger-ms"];

/// Configuration for glaze, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlazeConfig {
    /// Directory holding `<slug>.json` piece files, relative to the working directory
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Ordering used by `list` when neither a query nor a flag picks one
    #[serde(default)]
    pub default_sort: SortKey,

    /// Reveal delay between consecutive cards in rendered galleries
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_DIR)
}

fn default_stagger_ms() -> u64 {
    DEFAULT_STAGGER_MS
}

impl Default for GlazeConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            default_sort: SortKey::default(),
            stagger_ms: DEFAULT_STAGGER_MS,
        }
    }
}

impl GlazeConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(GlazeError::Io)?;
        let config: GlazeConfig =
            serde_json::from_str(&content).map_err(GlazeError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(GlazeError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(GlazeError::Serialization)?;
        fs::write(config_path, content).map_err(GlazeError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog-dir" => Some(self.catalog_dir.display().to_string()),
            "default-sort" => Some(self.default_sort.to_string()),
            "stagger-ms" => Some(self.stagger_ms.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "catalog-dir" => {
                if value.trim().is_empty() {
                    return Err("catalog-dir cannot be empty".to_string());
                }
                self.catalog_dir = PathBuf::from(value);
            }
            "default-sort" => {
                self.default_sort = value.parse()?;
            }
            "stagger-ms" => {
                self.stagger_ms = value
                    .parse()
                    .map_err(|_| format!("stagger-ms must be a whole number, got {}", value))?;
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlazeConfig::default();
        assert_eq!(config.catalog_dir, PathBuf::from("content/pieces"));
        assert_eq!(config.default_sort, SortKey::DateDesc);
        assert_eq!(config.stagger_ms, 50);
    }

    #[test]
    fn test_set_and_get_keys() {
        let mut config = GlazeConfig::default();
        config.set("default-sort", "title-asc").unwrap();
        config.set("stagger-ms", "120").unwrap();
        assert_eq!(config.get("default-sort").as_deref(), Some("title-asc"));
        assert_eq!(config.get("stagger-ms").as_deref(), Some("120"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = GlazeConfig::default();
        assert!(config.set("default-sort", "price").is_err());
        assert!(config.set("stagger-ms", "fast").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, GlazeConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = GlazeConfig::load(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config, GlazeConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = GlazeConfig::default();
        config.set("catalog-dir", "site/pieces").unwrap();
        config.save(temp_dir.path()).unwrap();

        let loaded = GlazeConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.catalog_dir, PathBuf::from("site/pieces"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: GlazeConfig = serde_json::from_str(r#"{"default_sort":"featured"}"#).unwrap();
        assert_eq!(parsed.default_sort, SortKey::Featured);
        assert_eq!(parsed.stagger_ms, 50);
    }
}
