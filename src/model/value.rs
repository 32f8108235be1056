use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::plugin::host_fns::Host;

type NativeFn = dyn Fn(&mut dyn Host, &[HostValue]) -> Result<HostValue> + Send + Sync;

/// A callable registered in the plugin's namespace.
#[derive(Clone)]
pub struct HostFn {
    name: String,
    inner: Arc<NativeFn>,
}

impl HostFn {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut dyn Host, &[HostValue]) -> Result<HostValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inner: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, host: &mut dyn Host, args: &[HostValue]) -> Result<HostValue> {
        (self.inner)(host, args)
    }
}

impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFn").field("name", &self.name).finish()
    }
}

/// Dynamically typed value exchanged with the dashboard host.
#[derive(Debug, Clone, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Function(HostFn),
}

impl HostValue {
    pub fn is_function(&self) -> bool {
        matches!(self, HostValue::Function(_))
    }

    pub fn as_function(&self) -> Option<&HostFn> {
        match self {
            HostValue::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HostValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Loose `== true` comparison, the rule dashboard scripts use for flags:
    /// `true`, the number 1, or text that reads as the number 1.
    pub fn equals_true(&self) -> bool {
        match self {
            HostValue::Bool(b) => *b,
            HostValue::Number(n) => *n == 1.0,
            HostValue::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| n == 1.0),
            HostValue::Undefined | HostValue::Null | HostValue::Function(_) => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Undefined => "undefined",
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::Text(_) => "string",
            HostValue::Function(_) => "function",
        }
    }
}

/// True iff `value` can be called.
pub fn is_function(value: &HostValue) -> bool {
    value.is_function()
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Undefined => f.write_str("undefined"),
            HostValue::Null => f.write_str("null"),
            HostValue::Bool(b) => write!(f, "{b}"),
            HostValue::Number(n) => write_number(f, *n),
            HostValue::Text(s) => f.write_str(s),
            HostValue::Function(func) => write!(f, "function {}()", func.name()),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == n.trunc() && n.abs() < 1e21 {
        // Integral values print without a fractional part; -0 prints as 0.
        write!(f, "{:.0}", if n == 0.0 { 0.0 } else { n })
    } else {
        write!(f, "{n}")
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Text(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Text(value)
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Number(value)
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Number(value as f64)
    }
}

impl From<u32> for HostValue {
    fn from(value: u32) -> Self {
        HostValue::Number(f64::from(value))
    }
}

impl From<HostFn> for HostValue {
    fn from(value: HostFn) -> Self {
        HostValue::Function(value)
    }
}
