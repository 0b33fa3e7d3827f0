//! XML page definition parser.
//!
//! Builds a [`Document`] from a `<manpage>` tree. Structural problems are
//! fatal; unknown tags are reported through [`Diagnostics`] and skipped.

pub mod blocks;
pub mod header;

use crate::error::{Diagnostics, Error, Result};
use crate::model::*;
use roxmltree::{Node, ParsingOptions};
use std::collections::HashMap;

const ROOT_TAG: &str = "manpage";

/// Parse a page definition.
pub fn parse(content: &str, diagnostics: &mut Diagnostics) -> Result<Document> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(content, options)?;
    parse_root(xml.root_element(), diagnostics)
}

fn parse_root(root: Node, diagnostics: &mut Diagnostics) -> Result<Document> {
    let root_name = root.tag_name().name();
    if root_name != ROOT_TAG {
        return Err(Error::Structural(format!(
            "document element \"{}\", not \"{}\" as expected",
            root_name, ROOT_TAG
        )));
    }

    // Group the interesting children, keeping document order within a group
    let mut headers = Vec::new();
    let mut sections = Vec::new();
    let mut reference_groups = Vec::new();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "header" => headers.push(child),
            "section" => sections.push(child),
            "references" => reference_groups.push(child),
            other => log::debug!("ignoring <{}> under <{}>", other, ROOT_TAG),
        }
    }

    let header = header::build_header_text(&headers, diagnostics);
    let sections = sections
        .iter()
        .map(|node| Section {
            name: attribute(*node, "title"),
            content: blocks::parse_blocks(node.children(), diagnostics),
        })
        .collect();
    let reftable = build_reference_table(&reference_groups)?;
    let references = build_reference_list(&reftable, &reference_groups)?;
    log::debug!(
        "parsed {} reference(s) in {} group(s)",
        reftable.len(),
        references.len()
    );

    Ok(Document {
        title: attribute(root, "title"),
        section: attribute(root, "section"),
        extra1: attribute(root, "extra1"),
        extra2: attribute(root, "extra2"),
        extra3: attribute(root, "extra3"),
        sections,
        references,
        reftable,
        header,
    })
}

/// Number every `<reference>` across all groups, 1-based in document order.
fn build_reference_table(groups: &[Node]) -> Result<HashMap<String, Reference>> {
    let raw = groups
        .iter()
        .flat_map(|group| group.children())
        .filter(|child| is_tag(*child, "reference"))
        .map(read_reference)
        .collect::<Result<Vec<_>>>()?;

    let mut table = HashMap::with_capacity(raw.len());
    for (i, reference) in raw.into_iter().enumerate() {
        if table.contains_key(&reference.id) {
            return Err(Error::DuplicateKey(reference.id));
        }
        let reference = Reference::numbered(reference, i + 1);
        log::debug!("reference \"{}\" numbered [{}]", reference.id, reference.index);
        table.insert(reference.id.clone(), reference);
    }
    Ok(table)
}

fn build_reference_list(
    table: &HashMap<String, Reference>,
    groups: &[Node],
) -> Result<Vec<Section<Reference>>> {
    groups
        .iter()
        .map(|group| {
            let content = group
                .children()
                .filter(|child| is_tag(*child, "reference"))
                .map(|child| {
                    let id = child.attribute("id").unwrap_or_default();
                    table
                        .get(id)
                        .cloned()
                        .ok_or_else(|| Error::MissingKey(id.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Section {
                name: attribute(*group, "title"),
                content,
            })
        })
        .collect()
}

fn read_reference(node: Node) -> Result<RawReference> {
    Ok(RawReference {
        id: required_attribute(node, "id")?,
        name: required_attribute(node, "name")?,
        href: required_attribute(node, "href")?,
    })
}

fn required_attribute(node: Node, name: &str) -> Result<String> {
    node.attribute(name).map(str::to_string).ok_or_else(|| {
        Error::Structural(format!(
            "<{}> is missing required attribute \"{}\"",
            node.tag_name().name(),
            name
        ))
    })
}

/// Attribute value, or an empty string when absent.
pub(crate) fn attribute(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}

pub(crate) fn is_tag(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}
