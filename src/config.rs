use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_post_author")]
    pub post_author: String,
    #[serde(default = "default_post_image")]
    pub default_post_image: String,
    #[serde(default = "default_advisor_endpoint")]
    pub advisor_endpoint: String,
    #[serde(default = "default_advisor_timeout_secs")]
    pub advisor_timeout_secs: u64,
    #[serde(default = "default_diet_plan_delay_ms")]
    pub diet_plan_delay_ms: u64,
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_next_tab")]
    pub next_tab: String,
    #[serde(default = "default_prev_tab")]
    pub prev_tab: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_toggle")]
    pub toggle: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_theme_toggle")]
    pub theme_toggle: String,
    #[serde(default = "default_sign_out")]
    pub sign_out: String,
    #[serde(default = "default_ask")]
    pub ask: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            post_author: default_post_author(),
            default_post_image: default_post_image(),
            advisor_endpoint: default_advisor_endpoint(),
            advisor_timeout_secs: default_advisor_timeout_secs(),
            diet_plan_delay_ms: default_diet_plan_delay_ms(),
            default_user: None,
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            next_tab: default_next_tab(),
            prev_tab: default_prev_tab(),
            new: default_new(),
            edit: default_edit(),
            delete: default_delete(),
            toggle: default_toggle(),
            select: default_select(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            help: default_help(),
            theme_toggle: default_theme_toggle(),
            sign_out: default_sign_out(),
            ask: default_ask(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            accent: default_accent(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            highlight_bg: "blue".to_string(),
            accent: "green".to_string(),
        });

        themes.insert("dark".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            highlight_bg: "cyan".to_string(),
            accent: "lightgreen".to_string(),
        });

        themes
    }
}

fn default_database_path() -> String {
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("fittrack.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/fittrack/fittrack.db".to_string()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_current_theme() -> String {
    "light".to_string()
}

fn default_post_author() -> String {
    "Anonymous".to_string()
}

fn default_post_image() -> String {
    "https://source.unsplash.com/random/400x200".to_string()
}

fn default_advisor_endpoint() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_advisor_timeout_secs() -> u64 {
    30
}

fn default_diet_plan_delay_ms() -> u64 {
    1000
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_next_tab() -> String {
    "Tab".to_string()
}

fn default_prev_tab() -> String {
    "BackTab".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_toggle() -> String {
    "Space".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_theme_toggle() -> String {
    "t".to_string()
}

fn default_sign_out() -> String {
    "Ctrl+o".to_string()
}

fn default_ask() -> String {
    "a".to_string()
}

fn default_fg() -> String {
    "black".to_string()
}

fn default_bg() -> String {
    "white".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_accent() -> String {
    "green".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine config and database paths
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        let mut config = Self::load_from_path(&config_path)?;
        // Database path always follows the profile, even if the file was edited by hand
        config.database_path = Self::default_database_path_for_profile(profile);
        Ok(config)
    }

    /// Load configuration from an explicit path, writing defaults there if it does not exist
    pub fn load_from_path(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_to_path(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to the profile's config file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("fittrack.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/fittrack-dev/fittrack.db".to_string(),
                utils::Profile::Prod => "~/.local/share/fittrack/fittrack.db".to_string(),
            }
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Log file sits next to the database
    pub fn get_log_path(&self) -> PathBuf {
        let db_path = self.get_database_path();
        match db_path.parent() {
            Some(parent) => parent.join("fittrack.log"),
            None => PathBuf::from("fittrack.log"),
        }
    }

    /// Get the currently active theme, falling back to the light preset
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            return theme.clone();
        }
        let presets = Theme::get_preset_themes();
        presets
            .get(&self.current_theme)
            .or_else(|| presets.get("light"))
            .cloned()
            .unwrap_or_default()
    }

    /// Set the active theme by name
    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }

    /// Flip between the light and dark presets
    pub fn toggle_theme(&mut self) -> &str {
        self.current_theme = if self.current_theme == "dark" {
            "light".to_string()
        } else {
            "dark".to_string()
        };
        &self.current_theme
    }
}
