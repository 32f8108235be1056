//! Dashboard tabs for the RAZB device type, and the string helpers they are
//! built with.
//!
//! The [`text`] module is usable on its own: positional `{i}` templates and
//! HTML entity encode/decode. The [`plugin`] module renders the Settings and
//! Donate panels against a [`plugin::Host`].

pub mod app;
pub mod error;
pub mod model;
pub mod msg;
pub mod plugin;
pub mod text;

pub use error::{Error, Result};
pub use model::value::{HostValue, is_function};
pub use text::{Template, format, format_single_pass, html_decode, html_encode};
