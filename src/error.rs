use thiserror::Error;

use crate::model::device::DeviceId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("tab not found: {0}")]
    TabNotFound(String),

    #[error("tab is ambiguous: {0} (matches several tabs)")]
    AmbiguousTab(String),

    #[error("{0} is not defined")]
    Undefined(String),

    #[error("{0} is not a function")]
    NotCallable(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("state write failed for device {device}: {reason}")]
    StateWrite { device: DeviceId, reason: String },

    #[error("invalid manifest: {0}")]
    Manifest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
