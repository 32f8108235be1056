use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::plugin::manager::{SAVE_VAR_FN, SERVICE_GLOBAL};

const BUILTIN_MANIFEST: &str = include_str!("../../config/plugin.toml");

pub const DEFAULT_SERVICE_ID: &str = "urn:upnp-org:serviceId:razb1";

#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub device_type: String,
    #[serde(default = "default_service_id")]
    pub service_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tabs: Vec<TabDef>,
}

/// A dashboard tab and the plugin function that renders it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TabDef {
    pub label: String,
    pub function: String,
    pub kind: TabKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    Settings,
    Donate,
}

fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_string()
}

impl PluginManifest {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_MANIFEST)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::parse(&raw).map_err(|err| match err {
            Error::Manifest(reason) => Error::Manifest(format!("{}: {reason}", path.display())),
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let manifest: PluginManifest = toml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.tabs.is_empty() {
            return Err(Error::Manifest(format!("{} declares no tabs", self.name)));
        }

        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if tab.function.trim().is_empty() {
                return Err(Error::Manifest(format!("tab {} has no function", tab.label)));
            }
            if [SERVICE_GLOBAL, SAVE_VAR_FN].contains(&tab.function.as_str()) {
                return Err(Error::Manifest(format!(
                    "tab {} uses reserved name {}",
                    tab.label, tab.function
                )));
            }
            if !seen.insert(tab.function.as_str()) {
                return Err(Error::Manifest(format!(
                    "function {} is bound to more than one tab",
                    tab.function
                )));
            }
        }

        Ok(())
    }
}
