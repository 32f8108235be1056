use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::device::{DeviceId, StateChange};

/// Capabilities the dashboard provides to the plugin.
pub trait Host {
    /// Replace the content of the active tab panel.
    fn set_panel_html(&mut self, html: &str);

    fn get_device_state(&self, device: DeviceId, service: &str, variable: &str) -> Option<String>;

    fn set_device_state(
        &mut self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
        change: StateChange,
    ) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey {
    pub device: DeviceId,
    pub service: String,
    pub name: String,
}

impl VariableKey {
    pub fn new(device: DeviceId, service: &str, name: &str) -> Self {
        Self {
            device,
            service: service.to_string(),
            name: name.to_string(),
        }
    }
}

/// One recorded `set_device_state` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateWrite {
    pub key: VariableKey,
    pub value: String,
    pub change: StateChange,
}

/// In-memory host that records everything the plugin does.
#[derive(Debug, Default)]
pub struct MemoryHost {
    panel: Option<String>,
    variables: HashMap<VariableKey, String>,
    writes: Vec<StateWrite>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, device: DeviceId, service: &str, name: &str, value: &str) -> Self {
        self.variables
            .insert(VariableKey::new(device, service, name), value.to_string());
        self
    }

    pub fn panel_html(&self) -> Option<&str> {
        self.panel.as_deref()
    }

    pub fn writes(&self) -> &[StateWrite] {
        &self.writes
    }
}

impl Host for MemoryHost {
    fn set_panel_html(&mut self, html: &str) {
        self.panel = Some(html.to_string());
    }

    fn get_device_state(&self, device: DeviceId, service: &str, variable: &str) -> Option<String> {
        self.variables
            .get(&VariableKey::new(device, service, variable))
            .cloned()
    }

    fn set_device_state(
        &mut self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
        change: StateChange,
    ) -> Result<()> {
        let key = VariableKey::new(device, service, variable);
        self.variables.insert(key.clone(), value.to_string());
        self.writes.push(StateWrite {
            key,
            value: value.to_string(),
            change,
        });
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    variables: Vec<StoredVariable>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredVariable {
    device: DeviceId,
    service: String,
    name: String,
    value: String,
}

/// Host backed by a TOML state file.
///
/// Persisted writes are saved immediately. Dynamic writes live only as long
/// as this value, the same way the controller drops them on restart.
#[derive(Debug)]
pub struct FileHost {
    path: PathBuf,
    persisted: BTreeMap<VariableKey, String>,
    dynamic: HashMap<VariableKey, String>,
}

impl FileHost {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut persisted = BTreeMap::new();

        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let file: StateFile = toml::from_str(&raw)?;
            for var in file.variables {
                persisted.insert(VariableKey::new(var.device, &var.service, &var.name), var.value);
            }
            tracing::debug!("loaded {} variables from {}", persisted.len(), path.display());
        }

        Ok(Self {
            path,
            persisted,
            dynamic: HashMap::new(),
        })
    }

    fn save(&self, device: DeviceId) -> Result<()> {
        let file = StateFile {
            variables: self
                .persisted
                .iter()
                .map(|(key, value)| StoredVariable {
                    device: key.device,
                    service: key.service.clone(),
                    name: key.name.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        let raw = toml::to_string_pretty(&file).map_err(|err| Error::StateWrite {
            device,
            reason: err.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Host for FileHost {
    // The harness prints the HTML returned by the tab call instead.
    fn set_panel_html(&mut self, html: &str) {
        tracing::debug!("panel updated ({} bytes)", html.len());
    }

    fn get_device_state(&self, device: DeviceId, service: &str, variable: &str) -> Option<String> {
        let key = VariableKey::new(device, service, variable);
        self.dynamic
            .get(&key)
            .or_else(|| self.persisted.get(&key))
            .cloned()
    }

    fn set_device_state(
        &mut self,
        device: DeviceId,
        service: &str,
        variable: &str,
        value: &str,
        change: StateChange,
    ) -> Result<()> {
        let key = VariableKey::new(device, service, variable);
        match change {
            StateChange::Dynamic => {
                self.dynamic.insert(key, value.to_string());
            }
            StateChange::Persisted => {
                self.dynamic.remove(&key);
                self.persisted.insert(key, value.to_string());
                self.save(device)?;
            }
        }
        Ok(())
    }
}
