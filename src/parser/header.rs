//! Header comment text: literal text plus `<meta name="..."/>` placeholders.

use crate::error::{Diagnostics, Warning};
use crate::expand::MARKER;
use crate::text::{dedent, is_blank};
use roxmltree::Node;

/// Concatenate all `<header>` nodes into one block of comment lines.
///
/// Each header is dedented on its own, loses a blank first and last line,
/// and has trailing whitespace stripped from every line.
pub fn build_header_text(nodes: &[Node], diagnostics: &mut Diagnostics) -> String {
    let mut total: Vec<String> = Vec::new();

    for node in nodes {
        let mut raw = String::new();
        for child in node.children() {
            if child.is_text() {
                raw.push_str(child.text().unwrap_or_default());
            } else if child.is_element() {
                match child.tag_name().name() {
                    "meta" => {
                        let name = child.attribute("name").unwrap_or_default();
                        raw.push_str(MARKER);
                        raw.push_str(&name.to_uppercase());
                        raw.push_str(MARKER);
                    }
                    other => {
                        diagnostics.warn(Warning::UnrecognisedHeaderTag(other.to_string()))
                    }
                }
            }
        }

        let dedented = dedent(&raw);
        let mut lines: Vec<&str> = dedented.split('\n').collect();
        if lines.first().is_some_and(|l| is_blank(l)) {
            lines.remove(0);
        }
        if lines.last().is_some_and(|l| is_blank(l)) {
            lines.pop();
        }
        total.extend(lines.into_iter().map(|l| l.trim_end().to_string()));
    }

    total.join("\n")
}
