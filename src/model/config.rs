use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub settings: SettingsConfig,
    pub donate: DonateConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub state_file: String,
    pub log_filter: String,
    #[serde(default)]
    pub manifest_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    pub table_class: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub variables: Vec<SettingVariable>,
}

/// A device variable shown as one row of the Settings table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SettingVariable {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonateConfig {
    pub message: String,
    /// Donation recipient; an empty value hides the form.
    #[serde(default)]
    pub business: String,
    pub item_name: String,
    pub item_number: String,
    pub currency: String,
    pub locale: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config. The user
    /// layer comes from `path` when given, otherwise from the platform
    /// config directory.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let user_path = path
            .map(Path::to_path_buf)
            .or_else(|| project_dirs().map(|d| d.config_dir().join("config.toml")));

        match user_path {
            Some(user_path) if user_path.exists() => {
                tracing::debug!("loading user config from {}", user_path.display());
                let user_str = fs::read_to_string(&user_path)?;
                Self::from_user_toml(&user_str)
            }
            Some(user_path) if path.is_some() => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", user_path.display()),
            )
            .into()),
            _ => Self::defaults(),
        }
    }

    pub fn defaults() -> Result<Self> {
        Ok(toml::from_str(DEFAULT_CONFIG)?)
    }

    /// Deep-merge `user` over the built-in defaults.
    pub fn from_user_toml(user: &str) -> Result<Self> {
        let mut merged: toml::Table = DEFAULT_CONFIG.parse()?;
        let user: toml::Table = user.parse()?;
        merge_tables(&mut merged, user);
        Ok(toml::Value::Table(merged).try_into::<AppConfig>()?)
    }

    /// Where the local harness keeps persisted device variables.
    pub fn state_path(&self) -> PathBuf {
        let path = expand_tilde(&self.general.state_file);
        if path.is_absolute() {
            return path;
        }

        project_dirs()
            .map(|d| d.data_dir().join(&path))
            .unwrap_or(path)
    }

    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.general.manifest_path.as_deref().map(expand_tilde)
    }
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                merge_tables(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

pub(crate) fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "razb-ui")
}

pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }

    match directories::BaseDirs::new() {
        Some(base_dirs) => {
            let home = base_dirs.home_dir().to_string_lossy().into_owned();
            PathBuf::from(path.replacen('~', &home, 1))
        }
        None => PathBuf::from(path),
    }
}
