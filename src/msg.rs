use crate::model::device::DeviceId;

/// Requests that drive the plugin harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // -- Plugin
    ListTabs,
    OpenTab { tab: String, device: DeviceId },

    // -- Device state
    SetVar {
        device: DeviceId,
        name: String,
        value: String,
        reload: bool,
    },
    GetVar { device: DeviceId, name: String },

    // -- Text helpers
    Format { template: String, args: Vec<String> },
    Encode(String),
    Decode(String),
}
