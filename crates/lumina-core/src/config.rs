use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::chat;
use super::grid::{GridSpec, OverflowPolicy};
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Track counts of the tile grid. Rows and (under `allow`) columns grow
/// past these when a layout needs more room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: u16,
    #[serde(default = "default_rows")]
    pub rows: u16,
    #[serde(default)]
    pub overflow: OverflowPolicy,
    /// Blank cells between tiles, in terminal columns.
    #[serde(default = "default_gap")]
    pub gap: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
            overflow: OverflowPolicy::default(),
            gap: default_gap(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_ms: default_animation_ms(),
            show_keys_bar: default_show_keys_bar(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_columns() -> u16 {
    5
}

fn default_rows() -> u16 {
    3
}

fn default_gap() -> u16 {
    1
}

fn default_model() -> String {
    chat::DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    chat::DEFAULT_TEMPERATURE
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_animation_ms() -> u64 {
    500
}

fn default_show_keys_bar() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    33
}

impl GridConfig {
    pub fn spec(&self) -> GridSpec {
        GridSpec {
            columns: self.columns.max(1),
            rows: self.rows.max(1),
            overflow: self.overflow,
        }
    }
}

impl ChatConfig {
    /// The API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.grid.columns, 5);
        assert_eq!(config.grid.rows, 3);
        assert_eq!(config.grid.overflow, OverflowPolicy::Allow);
        assert_eq!(config.chat.model, "gemini-2.5-flash");
        assert_eq!(config.chat.api_key_env, "API_KEY");
        assert!(config.chat.endpoint.starts_with("https://"));
        assert_eq!(config.ui.animation_ms, 500);
        assert!(Config::config_path().ends_with("config.toml"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("[grid]\noverflow = \"clamp\"\n").unwrap();
        assert_eq!(config.grid.overflow, OverflowPolicy::Clamp);
        assert_eq!(config.grid.columns, 5);
        assert!(config.ui.show_keys_bar);
        assert_eq!(config.chat.temperature, 0.7);
    }

    #[test]
    fn zero_tracks_are_raised() {
        let grid = GridConfig {
            columns: 0,
            rows: 0,
            ..GridConfig::default()
        };
        let spec = grid.spec();
        assert_eq!((spec.columns, spec.rows), (1, 1));
    }
}
