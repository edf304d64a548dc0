//! Block model and the single HCL formatter
//!
//! Fragment builders decide *what* to emit by producing [`Block`]s. This
//! module decides *how* it looks, with no knowledge of sites or hubs:
//!
//! ```text
//! provider "amplience" {
//!   alias         = "content"
//!   client_id     = "id"
//!   client_secret = "secret"
//!   hub_id        = "hub"
//! }
//! ```
//!
//! Values are always emitted as quoted HCL strings. Assignments keep their
//! insertion order and `=` signs are aligned per block, as `terraform fmt`
//! would leave them.

use std::fmt::Write;

const INDENT: &str = "  ";

/// A single `key = "value"` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
}

impl Assignment {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of assignments, optionally wrapped in a `header { }`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Opening line without the brace, e.g. `provider "amplience"`.
    /// Bare blocks render their assignments at the top level.
    pub header: Option<String>,
    pub assignments: Vec<Assignment>,
}

impl Block {
    /// Create a block wrapped in `header { ... }`
    pub fn wrapped(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            assignments: Vec::new(),
        }
    }

    /// Create a block of top-level assignments
    pub fn bare() -> Self {
        Self::default()
    }

    /// Append an assignment
    pub fn assign(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.assignments.push(Assignment::new(key, value));
        self
    }

    /// Render this block. The output always ends with a newline.
    pub fn render(&self) -> String {
        let width = self.assignments.iter().map(|a| a.key.len()).max().unwrap_or(0);
        let indent = if self.header.is_some() { INDENT } else { "" };

        let mut out = String::new();
        if let Some(header) = &self.header {
            let _ = writeln!(out, "{header} {{");
        }
        for assignment in &self.assignments {
            let _ = writeln!(
                out,
                "{indent}{key:<width$} = {value}",
                key = assignment.key,
                value = quote(&assignment.value),
            );
        }
        if self.header.is_some() {
            out.push_str("}\n");
        }
        out
    }
}

/// Render blocks in order, separated by a blank line.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote `value` as an HCL string literal.
///
/// Escapes backslashes, quotes and control characters, and doubles the
/// leading sigil of `${` and `%{` so secrets are never read as templates.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
