//! Text helpers shared by the parser and the renderers.

use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// True if the string is empty or consists only of whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Escape text for nroff: backslashes become `\e`, periods become `\.` so a
/// line can never be read as a request.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\e").replace('.', "\\.")
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Remove the indentation prefix shared by all non-blank lines.
///
/// Lines holding only spaces and tabs are emptied and do not take part in
/// computing the common prefix. Tabs and spaces are not equivalent.
pub fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut margin: Option<&str> = None;
    for line in lines.iter().filter(|l| !is_indent_only(l)) {
        let indent = leading_indent(line);
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    let cut = margin.map_or(0, str::len);

    lines
        .iter()
        .map(|l| if is_indent_only(l) { "" } else { &l[cut..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_indent_only(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    // Both sides are ASCII spaces and tabs, so byte offsets are char offsets.
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
