use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::device::DeviceId;
use crate::model::value::{HostValue, is_function};
use crate::plugin::host_fns::Host;

/// The plugin's global namespace, as the dashboard sees it.
#[derive(Debug, Clone, Default)]
pub struct PluginScope {
    globals: HashMap<String, HostValue>,
}

impl PluginScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        self.globals.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.globals.get(name)
    }

    /// Names bound to callables, sorted.
    pub fn functions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .globals
            .iter()
            .filter(|(_, value)| is_function(value))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn call(&self, name: &str, host: &mut dyn Host, args: &[HostValue]) -> Result<HostValue> {
        let value = self
            .globals
            .get(name)
            .ok_or_else(|| Error::Undefined(name.to_string()))?;

        match value.as_function() {
            Some(func) => {
                tracing::debug!("calling {name} with {} args", args.len());
                func.call(host, args)
            }
            None => Err(Error::NotCallable(format!("{name} ({})", value.type_name()))),
        }
    }
}

/// Read argument `index` as a device number.
pub(crate) fn device_arg(args: &[HostValue], index: usize) -> Result<DeviceId> {
    let invalid = |value: &HostValue| {
        Error::InvalidArgument(format!("argument {index} is not a device id: {value}"))
    };

    match args.get(index).unwrap_or(&HostValue::Undefined) {
        HostValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX) => {
            Ok(DeviceId(*n as u32))
        }
        HostValue::Text(s) => s
            .trim()
            .parse::<u32>()
            .map(DeviceId)
            .map_err(|_| invalid(&HostValue::Text(s.clone()))),
        other => Err(invalid(other)),
    }
}

/// Read argument `index` as text; missing arguments read as empty.
pub(crate) fn text_arg(args: &[HostValue], index: usize) -> String {
    match args.get(index) {
        None | Some(HostValue::Undefined) => String::new(),
        Some(value) => value.to_string(),
    }
}
