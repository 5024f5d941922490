//! Usage and help rendering.
//!
//! Layout:
//!
//! ```text
//! <description>
//!
//! usage:
//!   <program> [options...] <positionals...>
//!
//! Arguments
//!   name [type]:
//!         description, wrapped at 80 columns
//!
//! Options
//!   -f|--flag [name:type]:
//!         description, wrapped at 80 columns
//! ```

use crate::matches::Matches;
use crate::registry::Registry;

/// Column at which descriptions wrap.
pub const HELP_WIDTH: usize = 80;
/// Indent of description lines.
pub const HELP_INDENT: usize = 8;

fn push_line(out: &mut String, line: &str) {
    out.push_str(&" ".repeat(HELP_INDENT));
    out.push_str(line);
    out.push('\n');
}

/// Word-wrap `text` into indented lines no wider than [`HELP_WIDTH`].
///
/// Runs of whitespace, newlines included, collapse to a single space, so
/// line breaks in the source text are not kept. Words that do not fit on a
/// line of their own are split.
pub fn wrap_description(text: &str) -> String {
    let width = HELP_WIDTH - HELP_INDENT;
    let mut out = String::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let word_len = word.chars().count();
            if line_len == 0 {
                if word_len <= width {
                    line.push_str(word);
                    line_len = word_len;
                    break;
                }
                let Some((split, _)) = word.char_indices().nth(width) else {
                    break;
                };
                push_line(&mut out, &word[..split]);
                word = &word[split..];
                continue;
            }
            if line_len + 1 + word_len <= width {
                line.push(' ');
                line.push_str(word);
                line_len += 1 + word_len;
                break;
            }
            push_line(&mut out, &line);
            line.clear();
            line_len = 0;
        }
    }
    if line_len > 0 {
        push_line(&mut out, &line);
    }
    out
}

/// One-line synopsis: program, options, then positionals.
pub fn render_usage(program: &str, registry: &Registry) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !program.is_empty() {
        parts.push(program.to_string());
    }
    parts.extend(registry.options().iter().map(|o| o.usage_fragment()));
    parts.extend(registry.positionals().iter().map(|p| p.usage_fragment()));
    parts.join(" ")
}

/// Description and usage, followed by the per-argument sections unless
/// `simple` is set.
pub fn render_help(description: &str, program: &str, registry: &Registry, simple: bool) -> String {
    let mut out = String::new();
    if !description.is_empty() {
        out.push_str(description);
        out.push_str("\n\n");
    }
    out.push_str("usage:\n  ");
    out.push_str(&render_usage(program, registry));
    out.push('\n');
    if simple {
        return out;
    }

    if !registry.positionals().is_empty() {
        out.push_str("\nArguments\n");
        for p in registry.positionals() {
            out.push_str(&p.help_fragment());
        }
    }
    if !registry.options().is_empty() {
        out.push_str("\nOptions\n");
        for o in registry.options() {
            out.push_str(&o.help_fragment());
        }
    }
    out
}

/// Dump of the inputs, the declarations and whatever has been recorded.
pub fn render_status<S: AsRef<str>>(
    tokens: &[S],
    registry: &Registry,
    matches: &Matches,
) -> String {
    let mut out = String::from("# input arguments:");
    for token in tokens {
        out.push(' ');
        out.push_str(token.as_ref());
    }
    out.push('\n');

    let options: Vec<String> = registry.options().iter().map(|o| o.usage_fragment()).collect();
    out.push_str(&format!("# defined options: {}\n", options.join(" ")));

    let positionals: Vec<String> = registry
        .positionals()
        .iter()
        .map(|p| p.usage_fragment())
        .collect();
    out.push_str(&format!("# named arguments: {}\n", positionals.join(" ")));

    out.push_str("# parsed arguments:\n");
    for (name, values) in matches.iter() {
        out.push_str(&format!("    {name}:"));
        for v in values {
            out.push_str(&format!(" {v}"));
        }
        out.push('\n');
    }
    out
}
