use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub catalog: CatalogConfig,
    pub theme_name: String,
    #[serde(skip)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: usize,
    pub lint_enabled: bool,
    pub autocomplete_enabled: bool,
    pub lint_debounce_ms: u64,
    pub snippet_lint_delay_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 2,
            lint_enabled: true,
            autocomplete_enabled: true,
            lint_debounce_ms: 1500,
            snippet_lint_delay_ms: 500,
        }
    }
}

impl EditorConfig {
    pub fn lint_debounce(&self) -> Duration {
        Duration::from_millis(self.lint_debounce_ms)
    }

    pub fn snippet_lint_delay(&self) -> Duration {
        Duration::from_millis(self.snippet_lint_delay_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Command catalog file; `commands.txt` in the config directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            catalog: CatalogConfig::default(),
            theme_name: String::from("dark"),
            theme: Theme::dark(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config = Self::from_toml(&content)?;
            tracing::info!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!(path = %config_path.display(), "default config written");
            Ok(config)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config file")?;
        // Initialize theme from theme_name
        config.theme = Theme::from_name(&config.theme_name);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Catalog location, falling back to the config directory
    pub fn catalog_path(&self) -> Result<PathBuf> {
        match &self.catalog.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.config_dir().join("commands.txt")),
        }
    }

    /// Directory for the log file
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_local_dir().to_path_buf())
    }

    fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "bunnyide", "bunnyide")
            .context("Could not determine config directory")
    }
}
