use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::consts::DEFAULT_TASK;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Config {
    /// Display zone: IANA name, "local" or "UTC"
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) database: Option<PathBuf>,
    #[serde(default)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Choices offered by the interactive project picker
    #[serde(default = "default_projects")]
    pub(crate) projects: Vec<String>,
    #[serde(default = "default_task")]
    pub(crate) default_task: String,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: None,
            database: None,
            export_dir: None,
            projects: default_projects(),
            default_task: default_task(),
            no_color: false,
            order: None,
            color: None,
        }
    }
}

fn default_projects() -> Vec<String> {
    (1..=3).map(|n| format!("Project {n}")).collect()
}

fn default_task() -> String {
    DEFAULT_TASK.to_string()
}

impl Config {
    pub(crate) fn load() -> Self {
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/timelog/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("timelog").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/timelog/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("timelog").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.timelog.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".timelog.toml"));
        }

        paths
    }
}
