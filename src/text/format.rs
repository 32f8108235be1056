use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::sync::LazyLock;

use regex::{Captures, Regex};

// Canonical indices only: `{01}` is not a placeholder for argument 1.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(0|[1-9][0-9]*)\}").expect("valid placeholder regex"));

/// Substitute every `{i}` in `template` with the text of `args[i]`.
///
/// One pass runs per argument, index 0 first, each over the output of the
/// previous pass. A substituted value that itself contains `{j}` for a later
/// index `j` is therefore replaced again on pass `j`:
///
/// ```
/// assert_eq!(razb_ui::format("{0}", &[&"{1}", &"x"]), "x");
/// ```
///
/// Placeholders with no matching argument are left untouched, and replacement
/// text is inserted literally.
pub fn format(template: &str, args: &[&dyn Display]) -> String {
    let mut content = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        let pattern = format!("{{{i}}}");
        if content.contains(&pattern) {
            content = content.replace(&pattern, &arg.to_string());
        }
    }
    content
}

/// Like [`format`], but scans the template once. Substituted text is never
/// re-examined, so values containing `{j}` come through verbatim.
pub fn format_single_pass(template: &str, args: &[&dyn Display]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|arg| arg.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// A borrowed template string with positional `{i}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'a>(&'a str);

impl<'a> Template<'a> {
    pub const fn new(template: &'a str) -> Self {
        Self(template)
    }

    /// Multi-pass substitution, see [`format`].
    pub fn format(&self, args: &[&dyn Display]) -> String {
        format(self.0, args)
    }

    /// Single-pass substitution, see [`format_single_pass`].
    pub fn render(&self, args: &[&dyn Display]) -> String {
        format_single_pass(self.0, args)
    }

    /// Distinct placeholder indices, ascending.
    pub fn placeholders(&self) -> Vec<usize> {
        PLACEHOLDER_RE
            .captures_iter(self.0)
            .filter_map(|caps| caps[1].parse::<usize>().ok())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of arguments needed to fill every placeholder.
    pub fn arity(&self) -> usize {
        self.placeholders().last().map_or(0, |max| max + 1)
    }
}

impl Display for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
