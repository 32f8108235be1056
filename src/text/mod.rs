//! Positional templates and HTML entity encode/decode.
//!
//! Everything here is a pure function of its input and never fails.

pub mod format;
pub mod html;

pub use format::{Template, format, format_single_pass};
pub use html::{html_decode, html_encode, html_encode_attribute};
