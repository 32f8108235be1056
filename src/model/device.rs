use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard device number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a device variable write is applied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateChange {
    /// Saved to the host's durable store; survives a restart.
    Persisted,
    /// Applied in memory right away; lost on restart.
    #[default]
    Dynamic,
}

impl StateChange {
    /// Flag value the dashboard's `set_device_state` call expects.
    pub fn flag(&self) -> u8 {
        match self {
            StateChange::Persisted => 0,
            StateChange::Dynamic => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StateChange::Persisted => "persisted",
            StateChange::Dynamic => "dynamic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_change_flags() {
        assert_eq!(StateChange::Persisted.flag(), 0);
        assert_eq!(StateChange::Dynamic.flag(), 1);
        assert_eq!(StateChange::default(), StateChange::Dynamic);
    }

    #[test]
    fn test_device_id_display() {
        assert_eq!(DeviceId(42).to_string(), "42");
    }
}
