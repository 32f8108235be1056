pub mod host_fns;
pub mod manager;
pub mod manifest;
pub mod scope;
pub mod state;
pub mod tabs;

pub use host_fns::{FileHost, Host, MemoryHost};
pub use manager::PluginManager;
pub use manifest::PluginManifest;
pub use state::save_var;
