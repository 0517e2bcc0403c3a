//! Defaults document generation.
//!
//! Responsibilities:
//! - Render a commented TOML template listing every declared entry.
//!
//! Does NOT handle:
//! - Writing the document to disk; callers decide where it goes.
//!
//! Invariants:
//! - Secret entries never have their default written, only a commented placeholder.
//! - Entries without a default are written as commented placeholders.
//! - The output is valid TOML; loading it as a file source reproduces the written defaults.

use crate::constants::{DEFAULTS_BANNER, DESCRIPTION_WRAP_WIDTH};
use crate::schema::Schema;

const COMMENT_PREFIX: &str = "# ";

/// Render the defaults document for `schema`.
pub fn render_defaults(schema: &Schema) -> String {
    let mut out = String::new();

    if let Some(doc) = schema.doc() {
        push_comment_lines(&mut out, doc);
    }
    push_comment_lines(&mut out, DEFAULTS_BANNER);

    for (name, entry) in schema.entries() {
        out.push('\n');
        if let Some(comment) = entry.comment_text() {
            push_comment_lines(&mut out, comment);
        }
        if let Some(description) = entry.description_text() {
            let width = DESCRIPTION_WRAP_WIDTH - COMMENT_PREFIX.len();
            for line in wrap(description, width) {
                push_comment_lines(&mut out, &line);
            }
        }
        out.push_str(&format!("{COMMENT_PREFIX}type: {}\n", entry.value_type()));

        match entry.default_value() {
            Some(default) if !entry.is_secret() => {
                out.push_str(&format!("{name} = {default}\n"));
            }
            _ => out.push_str(&format!("{COMMENT_PREFIX}{name} =\n")),
        }
    }

    out
}

fn push_comment_lines(out: &mut String, text: &str) {
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            out.push_str(COMMENT_PREFIX);
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
